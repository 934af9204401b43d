//! # docqa-session
//!
//! The session interaction controller.
//!
//! [`SessionController`] owns one session and drives it through
//! `no_document → document_selected → uploading → document_ready`, then
//! serializes question/answer exchanges into the transcript. Every operation
//! re-checks its own guard, resolves to an [`Outcome`] and never returns an
//! error: failures land in the session's `last_error` slot.
//!
//! Operations take `&self`. The state lives behind a mutex that is never
//! held across an `.await`, so two calls polled concurrently on the same
//! controller see each other's phase changes. That is what makes a second
//! question submitted while one is in flight an ignored no-op rather than a
//! queued request.
//!
//! Observers call [`SessionController::subscribe`] and receive a
//! [`SessionSnapshot`] after every state change.

mod asking;
mod intake;
mod outcome;
mod state;

pub use outcome::{Guard, Outcome, OutcomeStatus};

use std::sync::{Mutex, MutexGuard, PoisonError};

use docqa_client::AnalysisService;
use docqa_config::SessionConfig;
use docqa_core::{DocumentInfo, Phase, SessionError, SessionSnapshot, TranscriptSnapshot};
use tokio::sync::broadcast;

use crate::state::SessionState;

/// Session controller over an [`AnalysisService`].
pub struct SessionController<S> {
    service: S,
    settings: SessionConfig,
    state: Mutex<SessionState>,
    events: broadcast::Sender<SessionSnapshot>,
}

impl<S: AnalysisService> SessionController<S> {
    /// Create a controller with a fresh session (`no_document`, empty
    /// transcript).
    ///
    /// Settings that fail [`SessionConfig::validate`] are repaired with their
    /// defaults rather than rejected, so a blank fallback answer is never
    /// recorded.
    #[must_use]
    pub fn new(service: S, mut settings: SessionConfig) -> Self {
        if let Err(error) = settings.validate() {
            tracing::warn!(%error, "invalid session settings; using defaults for bad values");
            let defaults = SessionConfig::default();
            if settings.fallback_answer.trim().is_empty() {
                settings.fallback_answer = defaults.fallback_answer;
            }
            if settings.event_capacity == 0 {
                settings.event_capacity = defaults.event_capacity;
            }
        }
        let (events, _) = broadcast::channel(settings.event_capacity);
        Self {
            service,
            settings,
            state: Mutex::new(SessionState::default()),
            events,
        }
    }

    /// Return the session to its initial state from any phase.
    ///
    /// A network call still outstanding when this runs resolves as
    /// [`OutcomeStatus::Superseded`] and leaves the fresh session untouched.
    pub fn reset(&self) -> Outcome {
        let mut state = self.lock();
        if state.phase.is_busy() {
            tracing::debug!(phase = %state.phase, "reset while a call is outstanding");
        }
        state.reset();
        self.completed(&mut state)
    }

    // ── Observers ──────────────────────────────────────────────────

    /// Receive a snapshot after every state change.
    ///
    /// Only changes made after subscribing are delivered. A receiver that
    /// falls more than `session.event_capacity` snapshots behind gets
    /// `RecvError::Lagged` and continues from the oldest retained one.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionSnapshot> {
        self.events.subscribe()
    }

    // ── Read accessors ─────────────────────────────────────────────

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    #[must_use]
    pub fn selected_document(&self) -> Option<DocumentInfo> {
        self.lock().document.as_ref().map(|doc| doc.info().clone())
    }

    #[must_use]
    pub fn last_error(&self) -> Option<SessionError> {
        self.lock().last_error.clone()
    }

    #[must_use]
    pub fn transcript(&self) -> TranscriptSnapshot {
        self.lock().transcript.snapshot()
    }

    #[must_use]
    pub const fn service(&self) -> &S {
        &self.service
    }

    #[must_use]
    pub const fn settings(&self) -> &SessionConfig {
        &self.settings
    }

    // ── Internals ──────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // The state is left consistent between statements, so a panic in
        // another holder does not invalidate it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a state change: bump the revision and notify observers.
    fn commit(&self, state: &mut SessionState) -> SessionSnapshot {
        state.revision += 1;
        let snapshot = state.snapshot();
        // No subscribers is fine.
        let _ = self.events.send(snapshot.clone());
        snapshot
    }

    fn completed(&self, state: &mut SessionState) -> Outcome {
        Outcome {
            status: OutcomeStatus::Completed,
            snapshot: self.commit(state),
        }
    }

    fn ignored(state: &SessionState, guard: Guard, operation: &'static str) -> Outcome {
        tracing::debug!(operation, phase = %state.phase, %guard, "guard rejected call");
        Outcome {
            status: OutcomeStatus::Ignored(guard),
            snapshot: state.snapshot(),
        }
    }

    fn superseded(state: &SessionState, operation: &'static str) -> Outcome {
        tracing::debug!(operation, "session was reset; dropping stale result");
        Outcome {
            status: OutcomeStatus::Superseded,
            snapshot: state.snapshot(),
        }
    }
}
