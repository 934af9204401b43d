//! Table layouts for session data.

use chrono::Local;
use docqa_core::{QaItem, SessionError, SessionSnapshot, TranscriptSnapshot};
use serde::Serialize;

use super::TableView;

fn transcript_row(index: usize, item: &QaItem) -> Vec<String> {
    vec![
        (index + 1).to_string(),
        item.timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string(),
        item.question.clone(),
        item.answer.clone(),
    ]
}

fn document_caption(snapshot: &SessionSnapshot) -> Option<String> {
    snapshot
        .document
        .as_ref()
        .map(|doc| format!("{} ({})", doc.name, doc.size_label()))
}

/// The session's status as key/value rows.
impl TableView for SessionSnapshot {
    fn headers(&self) -> Vec<&'static str> {
        vec!["field", "value"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let document = self.document.as_ref();
        vec![
            vec!["phase".to_string(), self.phase.to_string()],
            vec![
                "document".to_string(),
                document.map_or_else(|| "-".to_string(), |doc| doc.name.clone()),
            ],
            vec![
                "size".to_string(),
                document.map_or_else(|| "-".to_string(), |doc| doc.size_label()),
            ],
            vec![
                "pending".to_string(),
                self.pending_question.clone().unwrap_or_else(|| "-".to_string()),
            ],
            vec!["questions".to_string(), self.transcript.len().to_string()],
            vec![
                "error".to_string(),
                self.last_error
                    .as_ref()
                    .map_or_else(|| "-".to_string(), ToString::to_string),
            ],
        ]
    }
}

/// Transcript in chronological order.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct TranscriptView(pub TranscriptSnapshot);

impl TableView for TranscriptView {
    fn headers(&self) -> Vec<&'static str> {
        vec!["#", "time", "question", "answer"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.0
            .iter()
            .enumerate()
            .map(|(index, item)| transcript_row(index, item))
            .collect()
    }

    fn empty_message(&self) -> &'static str {
        "(no questions yet)"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedQuestion {
    pub question: String,
    pub error: SessionError,
}

/// Result of `docqa ask`: the final session plus the questions that failed.
#[derive(Debug, Clone, Serialize)]
pub struct AskReport {
    #[serde(flatten)]
    pub session: SessionSnapshot,
    pub failed: Vec<FailedQuestion>,
}

impl TableView for AskReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["#", "time", "question", "answer"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let answered = self.session.transcript.len();
        let mut rows: Vec<Vec<String>> = self
            .session
            .transcript
            .iter()
            .enumerate()
            .map(|(index, item)| transcript_row(index, item))
            .collect();
        rows.extend(self.failed.iter().enumerate().map(|(offset, failed)| {
            vec![
                (answered + offset + 1).to_string(),
                "-".to_string(),
                failed.question.clone(),
                format!("[failed] {}", failed.error),
            ]
        }));
        rows
    }

    fn caption(&self) -> Option<String> {
        document_caption(&self.session)
    }

    fn empty_message(&self) -> &'static str {
        "(no answers)"
    }
}
