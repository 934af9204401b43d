//! Error types for docqa.
//!
//! [`SessionError`] is what the session surfaces to the user through its
//! `last_error` slot. [`CoreError`] covers construction failures inside this
//! crate. Transport errors live in `docqa-client` and are folded into an
//! [`ErrorKind`] at the controller boundary.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building core values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The path does not name a file that can become a candidate.
    #[error("Invalid candidate file: {0}")]
    InvalidCandidate(String),
}

/// The three user-visible failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The candidate's declared type is not `application/pdf`.
    InvalidFileType,
    /// The upload call did not complete successfully.
    UploadFailed,
    /// The ask call did not complete successfully.
    AskFailed,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidFileType => "invalid_file_type",
            Self::UploadFailed => "upload_failed",
            Self::AskFailed => "ask_failed",
        }
    }

    /// Message shown to the user for this kind.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidFileType => "Please select a PDF file",
            Self::UploadFailed => "Failed to upload PDF. Please try again.",
            Self::AskFailed => "Failed to get answer. Please try again.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contents of the session's error slot: a kind plus its human message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<ErrorKind> for SessionError {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
