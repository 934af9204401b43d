use docqa_core::{Document, Phase, SessionError, SessionSnapshot, Transcript};

/// Mutable session fields, owned by the controller behind its mutex.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub(crate) phase: Phase,
    pub(crate) document: Option<Document>,
    pub(crate) pending_question: Option<String>,
    pub(crate) last_error: Option<SessionError>,
    pub(crate) transcript: Transcript,
    pub(crate) revision: u64,
    /// Advanced by every reset; network results issued under an older epoch
    /// are discarded.
    pub(crate) epoch: u64,
}

impl SessionState {
    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            revision: self.revision,
            phase: self.phase,
            document: self.document.as_ref().map(|doc| doc.info().clone()),
            pending_question: self.pending_question.clone(),
            last_error: self.last_error.clone(),
            transcript: self.transcript.snapshot(),
        }
    }

    /// Return every field to its initial value, keeping the revision and
    /// epoch counters moving forward.
    pub(crate) fn reset(&mut self) {
        let revision = self.revision;
        let epoch = self.epoch + 1;
        *self = Self {
            revision,
            epoch,
            ..Self::default()
        };
    }

    pub(crate) fn transition(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal transition {} -> {next}",
            self.phase
        );
        tracing::debug!(from = %self.phase, to = %next, "session transition");
        self.phase = next;
    }
}
