//! # docqa-core
//!
//! Session data model shared by every docqa crate.
//!
//! - [`Phase`]: the session state machine's states and gating predicates
//! - [`CandidateFile`] / [`Document`]: intake validation and the held upload
//! - [`Transcript`] / [`QaItem`]: the append-only question/answer log
//! - [`ErrorKind`] / [`SessionError`]: user-visible error slot contents
//! - [`SessionSnapshot`]: immutable view handed to observers and the CLI

pub mod document;
pub mod errors;
pub mod phase;
pub mod snapshot;
pub mod transcript;

pub use document::{CandidateFile, Document, DocumentInfo, PDF_MEDIA_TYPE};
pub use errors::{CoreError, ErrorKind, SessionError};
pub use phase::Phase;
pub use snapshot::SessionSnapshot;
pub use transcript::{QaItem, Transcript, TranscriptSnapshot};
