//! Result of a controller operation.

use std::fmt;

use docqa_core::{ErrorKind, SessionSnapshot};

/// Precondition that stopped an operation before it touched the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Guard {
    /// The current phase does not allow the operation.
    WrongPhase,
    /// Upload requested with no document held.
    NoDocument,
    /// The question was empty after trimming.
    EmptyQuestion,
}

impl Guard {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WrongPhase => "wrong_phase",
            Self::NoDocument => "no_document",
            Self::EmptyQuestion => "empty_question",
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The operation ran and succeeded.
    Completed,
    /// The operation ran and failed; the kind is also in `last_error`.
    Failed(ErrorKind),
    /// A guard rejected the call; nothing changed and nothing was published.
    Ignored(Guard),
    /// The session was reset while the network call was outstanding, so its
    /// result was dropped.
    Superseded,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::Failed(kind) => write!(f, "failed ({kind})"),
            Self::Ignored(guard) => write!(f, "ignored ({guard})"),
            Self::Superseded => f.write_str("superseded"),
        }
    }
}

/// What an operation did, plus the session as it stands afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: OutcomeStatus,
    pub snapshot: SessionSnapshot,
}

impl Outcome {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Completed)
    }

    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.status, OutcomeStatus::Ignored(_))
    }

    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self.status {
            OutcomeStatus::Failed(kind) => Some(kind),
            _ => None,
        }
    }
}
