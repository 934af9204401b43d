//! Session behaviour driven through the public controller API.

mod common;

use common::{ScriptedService, controller, pdf, ready_with};
use docqa_core::{CandidateFile, ErrorKind, Phase, SessionError};
use docqa_session::{Guard, OutcomeStatus};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn questions_and_answers(
    controller: &docqa_session::SessionController<ScriptedService>,
) -> Vec<(String, String)> {
    controller
        .transcript()
        .iter()
        .map(|item| (item.question.clone(), item.answer.clone()))
        .collect()
}

#[tokio::test]
async fn select_then_upload_makes_document_ready() {
    let controller = controller(ScriptedService::new().upload_ok());

    let selected = controller.select_candidate(pdf("report.pdf"));
    assert!(selected.is_completed());
    assert_eq!(selected.snapshot.phase, Phase::DocumentSelected);
    assert_eq!(
        selected.snapshot.document.as_ref().map(|d| d.name.as_str()),
        Some("report.pdf")
    );

    let uploaded = controller.upload().await;
    assert!(uploaded.is_completed());
    assert_eq!(uploaded.snapshot.phase, Phase::DocumentReady);
    assert!(uploaded.snapshot.transcript.is_empty());
    assert!(uploaded.snapshot.last_error.is_none());
    // kept for display
    assert!(controller.selected_document().is_some());

    let sent = controller.service().uploaded();
    assert_eq!(sent, vec![("report.pdf".to_string(), b"%PDF-1.7 report.pdf".to_vec())]);
}

#[rstest]
#[case("image.png", "image/png")]
#[case("notes.txt", "text/plain")]
#[case("scan.pdf", "application/octet-stream")]
#[case("upper.pdf", "APPLICATION/PDF")]
fn non_pdf_candidate_sets_invalid_file_type(#[case] name: &str, #[case] declared: &str) {
    let controller = controller(ScriptedService::new());

    let outcome = controller.select_candidate(CandidateFile::new(name, declared, vec![1, 2, 3]));

    assert_eq!(outcome.status, OutcomeStatus::Failed(ErrorKind::InvalidFileType));
    assert_eq!(controller.phase(), Phase::NoDocument);
    assert!(controller.selected_document().is_none());
    assert_eq!(
        controller.last_error(),
        Some(SessionError::from(ErrorKind::InvalidFileType))
    );
}

#[test]
fn invalid_candidate_keeps_previous_selection() {
    let controller = controller(ScriptedService::new());
    controller.select_candidate(pdf("keep.pdf"));

    controller.select_candidate(CandidateFile::new("image.png", "image/png", vec![]));

    assert_eq!(controller.phase(), Phase::DocumentSelected);
    assert_eq!(controller.selected_document().unwrap().name, "keep.pdf");
    assert_eq!(controller.last_error().unwrap().kind, ErrorKind::InvalidFileType);
}

#[test]
fn valid_selection_clears_previous_error_and_replaces_document() {
    let controller = controller(ScriptedService::new());
    controller.select_candidate(pdf("first.pdf"));
    controller.select_candidate(CandidateFile::new("image.png", "image/png", vec![]));

    let outcome = controller.select_candidate(pdf("second.pdf"));

    assert!(outcome.is_completed());
    assert!(controller.last_error().is_none());
    assert_eq!(controller.selected_document().unwrap().name, "second.pdf");
}

#[tokio::test]
async fn answered_question_is_appended() {
    let controller = controller(ScriptedService::new().answer("$4.2M"));
    ready_with(&controller, "report.pdf").await;

    let before = chrono::Utc::now();
    let outcome = controller.ask_question("What is the total revenue?").await;
    let after = chrono::Utc::now();

    assert!(outcome.is_completed());
    assert_eq!(outcome.snapshot.phase, Phase::DocumentReady);
    assert!(outcome.snapshot.pending_question.is_none());
    let transcript = controller.transcript();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].question, "What is the total revenue?");
    assert_eq!(transcript[0].answer, "$4.2M");
    assert!(before <= transcript[0].timestamp && transcript[0].timestamp <= after);
}

#[tokio::test]
async fn failed_question_leaves_transcript_untouched() {
    let controller = controller(ScriptedService::new().answer("first").ask_fails());
    ready_with(&controller, "report.pdf").await;
    controller.ask_question("q1").await;

    let outcome = controller.ask_question("q2").await;

    assert_eq!(outcome.status, OutcomeStatus::Failed(ErrorKind::AskFailed));
    assert_eq!(controller.phase(), Phase::DocumentReady);
    assert_eq!(controller.last_error().unwrap().kind, ErrorKind::AskFailed);
    assert_eq!(
        questions_and_answers(&controller),
        vec![("q1".to_string(), "first".to_string())]
    );
}

#[tokio::test]
async fn next_question_clears_ask_failure() {
    let controller = controller(ScriptedService::new().ask_fails().answer("ok"));
    ready_with(&controller, "report.pdf").await;
    controller.ask_question("q").await;
    assert!(controller.last_error().is_some());

    controller.ask_question("q").await;

    assert!(controller.last_error().is_none());
    assert_eq!(controller.transcript().len(), 1);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\t ")]
#[tokio::test]
async fn blank_question_is_ignored(#[case] text: &str) {
    let controller = controller(ScriptedService::new());
    ready_with(&controller, "report.pdf").await;
    let before = controller.snapshot();

    let outcome = controller.ask_question(text).await;

    assert_eq!(outcome.status, OutcomeStatus::Ignored(Guard::EmptyQuestion));
    assert_eq!(controller.snapshot(), before);
    assert!(controller.service().asked().is_empty());
}

#[tokio::test]
async fn question_is_trimmed_before_sending_and_recording() {
    let controller = controller(ScriptedService::new().answer("42"));
    ready_with(&controller, "report.pdf").await;

    controller.ask_question("  what is it?\n").await;

    assert_eq!(controller.service().asked(), vec!["what is it?".to_string()]);
    assert_eq!(controller.transcript()[0].question, "what is it?");
}

#[tokio::test]
async fn missing_or_blank_answer_uses_fallback() {
    let controller = controller(ScriptedService::new().no_answer().answer("  "));
    ready_with(&controller, "report.pdf").await;

    controller.ask_question("a?").await;
    controller.ask_question("b?").await;

    let answers: Vec<String> = controller
        .transcript()
        .iter()
        .map(|item| item.answer.clone())
        .collect();
    assert_eq!(answers, vec!["No answer received", "No answer received"]);
}

#[rstest]
#[case::no_document(false)]
#[case::document_selected(true)]
#[tokio::test]
async fn ask_outside_document_ready_changes_nothing(#[case] select: bool) {
    let controller = controller(ScriptedService::new());
    controller.select_candidate(CandidateFile::new("image.png", "image/png", vec![]));
    if select {
        controller.select_candidate(pdf("report.pdf"));
        controller.select_candidate(CandidateFile::new("image.png", "image/png", vec![]));
    }
    let before = controller.snapshot();
    assert!(before.last_error.is_some());

    let outcome = controller.ask_question("anything?").await;

    assert_eq!(outcome.status, OutcomeStatus::Ignored(Guard::WrongPhase));
    assert_eq!(controller.snapshot(), before);
    assert!(controller.service().asked().is_empty());
}

#[tokio::test]
async fn questions_are_recorded_in_submission_order() {
    let controller = controller(ScriptedService::new().answer("a1").answer("a2").answer("a3"));
    ready_with(&controller, "report.pdf").await;

    for question in ["q1", "q2", "q3"] {
        assert!(controller.ask_question(question).await.is_completed());
    }

    assert_eq!(
        questions_and_answers(&controller),
        vec![
            ("q1".to_string(), "a1".to_string()),
            ("q2".to_string(), "a2".to_string()),
            ("q3".to_string(), "a3".to_string()),
        ]
    );
    let stamps: Vec<_> = controller.transcript().iter().map(|i| i.timestamp).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn duplicate_questions_are_kept() {
    let controller = controller(ScriptedService::new());
    ready_with(&controller, "report.pdf").await;

    controller.ask_question("same?").await;
    controller.ask_question("same?").await;

    assert_eq!(controller.transcript().len(), 2);
}

#[tokio::test]
async fn upload_failure_reverts_to_selected_and_retry_resends_same_bytes() {
    let controller = controller(ScriptedService::new().upload_fails().upload_ok());
    controller.select_candidate(pdf("report.pdf"));

    let failed = controller.upload().await;
    assert_eq!(failed.status, OutcomeStatus::Failed(ErrorKind::UploadFailed));
    assert_eq!(failed.snapshot.phase, Phase::DocumentSelected);
    assert_eq!(
        failed.snapshot.last_error,
        Some(SessionError::from(ErrorKind::UploadFailed))
    );
    assert_eq!(controller.selected_document().unwrap().name, "report.pdf");

    let retried = controller.upload().await;
    assert!(retried.is_completed());
    assert!(retried.snapshot.last_error.is_none());

    let sent = controller.service().uploaded();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], sent[1]);
}

#[tokio::test]
async fn upload_without_selection_is_ignored() {
    let controller = controller(ScriptedService::new());

    let outcome = controller.upload().await;

    assert_eq!(outcome.status, OutcomeStatus::Ignored(Guard::WrongPhase));
    assert!(controller.service().uploaded().is_empty());
    assert!(outcome.snapshot.is_pristine());
}

#[tokio::test]
async fn upload_when_ready_is_ignored() {
    let controller = controller(ScriptedService::new());
    ready_with(&controller, "report.pdf").await;

    let outcome = controller.upload().await;

    assert_eq!(outcome.status, OutcomeStatus::Ignored(Guard::WrongPhase));
    assert_eq!(controller.service().uploaded().len(), 1);
}

#[tokio::test]
async fn non_pdf_while_ready_sets_invalid_file_type() {
    let controller = controller(ScriptedService::new().answer("a1"));
    ready_with(&controller, "report.pdf").await;
    controller.ask_question("q1").await;

    let outcome = controller.select_candidate(CandidateFile::new("image.png", "image/png", vec![]));

    assert_eq!(outcome.status, OutcomeStatus::Failed(ErrorKind::InvalidFileType));
    assert_eq!(controller.phase(), Phase::DocumentReady);
    assert_eq!(controller.selected_document().unwrap().name, "report.pdf");
    assert_eq!(controller.last_error().unwrap().kind, ErrorKind::InvalidFileType);
    assert_eq!(controller.transcript().len(), 1);
}

#[tokio::test]
async fn new_pdf_while_ready_keeps_transcript_when_its_upload_fails() {
    let controller = controller(ScriptedService::new().upload_ok().upload_fails().answer("a1"));
    ready_with(&controller, "first.pdf").await;
    controller.ask_question("q1").await;

    let selected = controller.select_candidate(pdf("second.pdf"));
    assert!(selected.is_completed());
    assert_eq!(selected.snapshot.phase, Phase::DocumentSelected);

    let uploaded = controller.upload().await;

    assert_eq!(uploaded.status, OutcomeStatus::Failed(ErrorKind::UploadFailed));
    assert_eq!(controller.phase(), Phase::DocumentSelected);
    assert_eq!(controller.selected_document().unwrap().name, "second.pdf");
    assert_eq!(
        questions_and_answers(&controller),
        vec![("q1".to_string(), "a1".to_string())]
    );
}

#[tokio::test]
async fn successful_upload_clears_previous_transcript() {
    let controller = controller(ScriptedService::new().answer("a1").answer("a2"));
    ready_with(&controller, "first.pdf").await;
    controller.ask_question("q1").await;
    controller.ask_question("q2").await;
    let old_transcript = controller.transcript();

    controller.select_candidate(pdf("second.pdf"));
    assert_eq!(controller.transcript().len(), 2);
    let uploaded = controller.upload().await;

    assert!(uploaded.is_completed());
    assert_eq!(uploaded.snapshot.phase, Phase::DocumentReady);
    assert!(uploaded.snapshot.transcript.is_empty());
    assert_eq!(controller.selected_document().unwrap().name, "second.pdf");
    // snapshots handed out earlier are unaffected
    assert_eq!(old_transcript.len(), 2);
}

#[tokio::test]
async fn new_document_starts_with_empty_transcript() {
    let controller = controller(ScriptedService::new());
    ready_with(&controller, "first.pdf").await;
    controller.ask_question("q1").await;
    controller.ask_question("q2").await;
    let old_transcript = controller.transcript();

    controller.reset();
    ready_with(&controller, "second.pdf").await;

    assert_eq!(controller.phase(), Phase::DocumentReady);
    assert!(controller.transcript().is_empty());
    // snapshots handed out earlier are unaffected
    assert_eq!(old_transcript.len(), 2);
}

#[tokio::test]
async fn reset_after_any_sequence_is_pristine() {
    let controller = controller(ScriptedService::new().upload_fails().ask_fails());
    controller.select_candidate(CandidateFile::new("a.png", "image/png", vec![]));
    controller.select_candidate(pdf("report.pdf"));
    controller.upload().await;
    controller.upload().await;
    controller.ask_question("q1").await;
    controller.ask_question("q2").await;
    assert!(!controller.snapshot().is_pristine());

    let outcome = controller.reset();

    assert!(outcome.snapshot.is_pristine());
    assert!(controller.snapshot().is_pristine());
    // resetting a fresh session is also fine
    assert!(controller.reset().snapshot.is_pristine());
}
