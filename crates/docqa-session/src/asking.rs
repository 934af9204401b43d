//! The ask cycle: `document_ready → asking_question → document_ready`.

use docqa_client::AnalysisService;
use docqa_core::{ErrorKind, Phase, SessionError};

use crate::{Guard, Outcome, OutcomeStatus, SessionController};

impl<S: AnalysisService> SessionController<S> {
    /// Ask a question about the uploaded document.
    ///
    /// Ignored unless the session is `document_ready` and `text` is non-empty
    /// after trimming. The trimmed text is what gets sent and recorded. A
    /// successful reply is appended to the transcript, substituting
    /// `session.fallback_answer` when the service gave no answer; a failed one
    /// sets [`ErrorKind::AskFailed`] and leaves the transcript alone.
    pub async fn ask_question(&self, text: &str) -> Outcome {
        let question = text.trim();
        let epoch = {
            let mut state = self.lock();
            if !state.phase.accepts_question() {
                return Self::ignored(&state, Guard::WrongPhase, "ask");
            }
            if question.is_empty() {
                return Self::ignored(&state, Guard::EmptyQuestion, "ask");
            }
            state.pending_question = Some(question.to_string());
            state.last_error = None;
            state.transition(Phase::AskingQuestion);
            self.commit(&mut state);
            state.epoch
        };

        let result = self.service().ask(question).await;

        let mut state = self.lock();
        if state.epoch != epoch {
            return Self::superseded(&state, "ask");
        }
        state.pending_question = None;
        state.transition(Phase::DocumentReady);
        match result {
            Ok(answer) => {
                let answer = answer
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| self.settings().fallback_answer.clone());
                let answered_at = state.transcript.append(question, answer).timestamp;
                tracing::info!(
                    %answered_at,
                    entries = state.transcript.len(),
                    "question answered"
                );
                self.completed(&mut state)
            }
            Err(error) => {
                tracing::warn!(%error, "question failed");
                state.last_error = Some(SessionError::from(ErrorKind::AskFailed));
                Outcome {
                    status: OutcomeStatus::Failed(ErrorKind::AskFailed),
                    snapshot: self.commit(&mut state),
                }
            }
        }
    }
}
