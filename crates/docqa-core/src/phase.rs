//! Session phase and its transition table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete state of a session.
///
/// ```text
/// no_document → document_selected ⇄ uploading → document_ready ⇄ asking_question
/// document_selected → document_selected          (re-selection)
/// document_ready    → document_selected          (new candidate)
/// any               → no_document                (reset)
/// ```
///
/// `asking_question` is transient: every answer, successful or not, returns
/// the session to `document_ready`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    NoDocument,
    DocumentSelected,
    Uploading,
    DocumentReady,
    AskingQuestion,
}

impl Phase {
    /// Valid next states from the current state, excluding reset.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::NoDocument => &[Self::DocumentSelected],
            Self::DocumentSelected => &[Self::DocumentSelected, Self::Uploading],
            Self::Uploading => &[Self::DocumentReady, Self::DocumentSelected],
            Self::DocumentReady => &[Self::AskingQuestion, Self::DocumentSelected],
            Self::AskingQuestion => &[Self::DocumentReady],
        }
    }

    /// Check whether transitioning to `next` is allowed. Reset to
    /// [`Phase::NoDocument`] is always allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        next == Self::NoDocument || self.allowed_next_states().contains(&next)
    }

    /// A new candidate may be chosen. Anything but a phase with a call in
    /// flight.
    #[must_use]
    pub const fn accepts_selection(self) -> bool {
        !self.is_busy()
    }

    /// The selected document may be sent.
    #[must_use]
    pub const fn accepts_upload(self) -> bool {
        matches!(self, Self::DocumentSelected)
    }

    /// A question may be submitted.
    #[must_use]
    pub const fn accepts_question(self) -> bool {
        matches!(self, Self::DocumentReady)
    }

    /// A network call is outstanding.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Uploading | Self::AskingQuestion)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoDocument => "no_document",
            Self::DocumentSelected => "document_selected",
            Self::Uploading => "uploading",
            Self::DocumentReady => "document_ready",
            Self::AskingQuestion => "asking_question",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
