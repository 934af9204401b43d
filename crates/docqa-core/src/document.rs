//! Candidate files and the accepted document held by the session.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, ErrorKind};

/// The only media type the intake accepts.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A file the user has picked but the intake has not yet accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    /// MIME type as declared by whatever produced the file.
    pub declared_type: String,
    pub contents: Vec<u8>,
}

impl CandidateFile {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            contents: contents.into(),
        }
    }

    /// Read a file from disk, declaring its type from the extension the way
    /// a browser file picker does. Unknown extensions declare
    /// `application/octet-stream`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCandidate`] if the path has no file name and
    /// [`CoreError::Io`] if it cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| CoreError::InvalidCandidate(path.display().to_string()))?
            .to_string();
        let contents = std::fs::read(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let declared_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self {
            name,
            declared_type,
            contents,
        })
    }

    /// Whether the declared type is exactly the PDF media type.
    ///
    /// No sniffing and no case folding: `Application/PDF` or
    /// `application/pdf; charset=binary` are rejected like any other type.
    #[must_use]
    pub fn is_pdf(&self) -> bool {
        self.declared_type == PDF_MEDIA_TYPE
    }

    /// Accept the candidate as the session's document.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidFileType`] when the declared type is not
    /// [`PDF_MEDIA_TYPE`].
    pub fn accept(self) -> Result<Document, ErrorKind> {
        if !self.is_pdf() {
            return Err(ErrorKind::InvalidFileType);
        }
        Ok(Document {
            info: DocumentInfo {
                name: self.name,
                size_bytes: self.contents.len() as u64,
                media_type: self.declared_type,
            },
            contents: self.contents.into(),
        })
    }
}

/// Display metadata for the selected document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub name: String,
    pub size_bytes: u64,
    pub media_type: String,
}

impl DocumentInfo {
    /// Size in megabytes with two decimals, e.g. `"1.23 MB"`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size_bytes as f64 / 1024.0 / 1024.0)
    }
}

/// An accepted document: metadata plus the bytes to upload.
///
/// The bytes are shared, so a failed upload can be retried with the same
/// contents without the caller re-reading the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    info: DocumentInfo,
    contents: Arc<[u8]>,
}

impl Document {
    #[must_use]
    pub const fn info(&self) -> &DocumentInfo {
        &self.info
    }

    #[must_use]
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}
