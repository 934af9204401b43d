use std::io::Write;
use std::path::{Path, PathBuf};

use docqa_client::AnalysisService;
use docqa_config::DocqaConfig;
use docqa_core::{CandidateFile, Phase};
use docqa_session::{Guard, Outcome, OutcomeStatus, SessionController};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::bootstrap;
use crate::cli::{ChatArgs, GlobalFlags, OutputFormat};
use crate::output::{self, TranscriptView};
use crate::ui;

const HELP: &str = "\
Type a question and press enter. Commands:
  :open <path>   switch to another PDF (starts a new session)
  :upload        retry uploading the selected PDF
  :history       show the questions asked so far
  :status        show the session state
  :reset         clear the session
  :quit          leave";

/// One line of chat input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Blank,
    Question(String),
    Open(PathBuf),
    Upload,
    History,
    Status,
    Reset,
    Help,
    Quit,
    Invalid(String),
}

impl ChatInput {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Blank;
        }
        let Some(command) = line.strip_prefix(':') else {
            return Self::Question(line.to_string());
        };

        let (name, rest) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(name, rest)| (name, rest.trim()));
        match (name, rest) {
            ("open" | "o", "") => Self::Invalid("usage: :open <path>".to_string()),
            ("open" | "o", path) => Self::Open(PathBuf::from(path)),
            ("upload" | "u", "") => Self::Upload,
            ("history" | "h", "") => Self::History,
            ("status" | "s", "") => Self::Status,
            ("reset", "") => Self::Reset,
            ("help" | "?", "") => Self::Help,
            ("quit" | "q" | "exit", "") => Self::Quit,
            _ => Self::Invalid(format!("unknown command ':{command}' (try :help)")),
        }
    }
}

/// Handle `docqa chat`.
pub async fn handle(
    args: &ChatArgs,
    config: &DocqaConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let controller = bootstrap::controller(config)?;
    let logger = bootstrap::spawn_transition_logger(&controller);
    let mut out = std::io::stdout();
    let prompt = ui::prefs().prompt;

    let result = session(&controller, args.file.as_deref(), &mut out, flags.format, prompt).await;

    drop(controller);
    let _ = logger.await;
    result
}

async fn session<S: AnalysisService>(
    controller: &SessionController<S>,
    file: Option<&Path>,
    out: &mut std::io::Stdout,
    format: OutputFormat,
    prompt: bool,
) -> anyhow::Result<()> {
    if let Some(file) = file {
        open(controller, file, out).await?;
    } else if prompt {
        writeln!(out, "{HELP}")?;
    }
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    run_loop(controller, input, out, format, prompt).await
}

/// Read lines from `input` until end of input or `:quit`.
pub async fn run_loop<S, R, W>(
    controller: &SessionController<S>,
    input: R,
    out: &mut W,
    format: OutputFormat,
    prompt: bool,
) -> anyhow::Result<()>
where
    S: AnalysisService,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "docqa> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match ChatInput::parse(&line) {
            ChatInput::Blank => {}
            ChatInput::Quit => break,
            ChatInput::Help => writeln!(out, "{HELP}")?,
            ChatInput::Invalid(message) => writeln!(out, "{message}")?,
            ChatInput::Open(path) => open(controller, &path, out).await?,
            ChatInput::Upload => {
                let outcome = controller.upload().await;
                if outcome.is_completed() {
                    writeln!(out, "Ready. Ask a question.")?;
                } else {
                    report(out, &outcome)?;
                }
            }
            ChatInput::History => {
                let view = TranscriptView(controller.transcript());
                writeln!(out, "{}", output::render(&view, format)?)?;
            }
            ChatInput::Status => {
                writeln!(out, "{}", output::render(&controller.snapshot(), format)?)?;
            }
            ChatInput::Reset => {
                controller.reset();
                writeln!(out, "Session cleared.")?;
            }
            ChatInput::Question(text) => {
                let outcome = controller.ask_question(&text).await;
                match outcome.snapshot.transcript.last() {
                    Some(item) if outcome.is_completed() => writeln!(out, "{}", item.answer)?,
                    _ => report(out, &outcome)?,
                }
            }
        }
    }
    Ok(())
}

/// Start over with the file at `path`: read, reset, select, upload.
///
/// A file that cannot be read leaves the current session as it was.
async fn open<S, W>(
    controller: &SessionController<S>,
    path: &Path,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: AnalysisService,
    W: Write,
{
    let candidate = match CandidateFile::from_path(path) {
        Ok(candidate) => candidate,
        Err(error) => {
            writeln!(out, "{error}")?;
            return Ok(());
        }
    };
    controller.reset();

    let selected = controller.select_candidate(candidate);
    if !selected.is_completed() {
        return report(out, &selected);
    }
    if let Some(document) = &selected.snapshot.document {
        writeln!(out, "Uploading {} ({})...", document.name, document.size_label())?;
    }

    let uploaded = controller.upload().await;
    if uploaded.is_completed() {
        writeln!(out, "Ready. Ask a question.")?;
        Ok(())
    } else {
        report(out, &uploaded)
    }
}

fn report<W: Write>(out: &mut W, outcome: &Outcome) -> anyhow::Result<()> {
    if let Some(message) = describe(outcome) {
        writeln!(out, "{message}")?;
    }
    Ok(())
}

/// User-facing line for an outcome that did not complete.
fn describe(outcome: &Outcome) -> Option<String> {
    let hint = match outcome.status {
        OutcomeStatus::Completed | OutcomeStatus::Ignored(Guard::EmptyQuestion) => return None,
        OutcomeStatus::Failed(kind) => {
            return Some(
                outcome
                    .snapshot
                    .last_error
                    .as_ref()
                    .map_or_else(|| kind.message().to_string(), ToString::to_string),
            );
        }
        OutcomeStatus::Superseded => "Discarded: the session was reset.",
        OutcomeStatus::Ignored(Guard::NoDocument) => "No document selected. Use :open <path>.",
        OutcomeStatus::Ignored(Guard::WrongPhase) => match outcome.snapshot.phase {
            Phase::NoDocument => "No document selected. Use :open <path>.",
            Phase::DocumentSelected => "The document is not uploaded yet. Use :upload.",
            Phase::Uploading | Phase::AskingQuestion => "Still waiting on the service.",
            Phase::DocumentReady => "A document is already uploaded. Use :open <path> to switch.",
        },
    };
    Some(hint.to_string())
}
