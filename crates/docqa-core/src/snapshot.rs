use serde::{Deserialize, Serialize};

use crate::document::DocumentInfo;
use crate::errors::SessionError;
use crate::phase::Phase;
use crate::transcript::TranscriptSnapshot;

/// Point-in-time view of a session, published to observers after every
/// state change and returned from every controller operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Incremented on every state change; equal revisions mean equal state.
    pub revision: u64,
    pub phase: Phase,
    pub document: Option<DocumentInfo>,
    pub pending_question: Option<String>,
    pub last_error: Option<SessionError>,
    pub transcript: TranscriptSnapshot,
}

impl SessionSnapshot {
    /// The session is back in its initial state.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        self.phase == Phase::NoDocument
            && self.document.is_none()
            && self.pending_question.is_none()
            && self.last_error.is_none()
            && self.transcript.is_empty()
    }
}
