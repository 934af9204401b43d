use anyhow::{Context, bail};
use docqa_client::AnalysisService;
use docqa_config::DocqaConfig;
use docqa_core::{CandidateFile, SessionError};
use docqa_session::{Guard, OutcomeStatus, SessionController};

use crate::bootstrap;
use crate::cli::{AskArgs, GlobalFlags};
use crate::output::{self, AskReport, FailedQuestion};

/// Handle `docqa ask`.
pub async fn handle(
    args: &AskArgs,
    config: &DocqaConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let controller = bootstrap::controller(config)?;
    let logger = bootstrap::spawn_transition_logger(&controller);

    let report = run(&controller, args).await;
    drop(controller);
    let _ = logger.await;

    let report = report?;
    output::output(&report, flags.format)?;

    if !report.failed.is_empty() {
        bail!(
            "{} of {} question(s) failed",
            report.failed.len(),
            report.failed.len() + report.session.transcript.len()
        );
    }
    Ok(())
}

/// Select, upload, then ask every question in order.
///
/// A rejected file or failed upload aborts; a failed question is recorded in
/// the report and the remaining questions are still asked.
pub async fn run<S: AnalysisService>(
    controller: &SessionController<S>,
    args: &AskArgs,
) -> anyhow::Result<AskReport> {
    let file = args.file.display();
    let candidate = CandidateFile::from_path(&args.file)
        .with_context(|| format!("failed to open {file}"))?;

    let selected = controller.select_candidate(candidate);
    if let Some(kind) = selected.error_kind() {
        bail!("{file}: {}", kind.message());
    }

    let uploaded = controller.upload().await;
    match uploaded.status {
        OutcomeStatus::Completed => {}
        OutcomeStatus::Failed(kind) => bail!("{file}: {}", kind.message()),
        other => bail!("{file}: upload {other}"),
    }

    let mut failed = Vec::new();
    for question in &args.questions {
        let outcome = controller.ask_question(question).await;
        match outcome.status {
            OutcomeStatus::Completed => {}
            OutcomeStatus::Failed(kind) => failed.push(FailedQuestion {
                question: question.trim().to_string(),
                error: outcome
                    .snapshot
                    .last_error
                    .unwrap_or_else(|| SessionError::from(kind)),
            }),
            OutcomeStatus::Ignored(Guard::EmptyQuestion) => {
                tracing::warn!("skipping blank question");
            }
            other => bail!("question '{question}': {other}"),
        }
    }

    Ok(AskReport {
        session: controller.snapshot(),
        failed,
    })
}
