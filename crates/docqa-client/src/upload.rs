//! Document upload call.

use docqa_core::Document;
use reqwest::multipart::{Form, Part};

use crate::{HttpAnalysisClient, error::ServiceError, http::check_response};

/// Multipart field carrying the document.
const FILE_FIELD: &str = "file";

impl HttpAnalysisClient {
    /// Upload `document` as a multipart file field.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the request fails or the service returns
    /// a non-success status.
    pub async fn upload_document(&self, document: &Document) -> Result<(), ServiceError> {
        let info = document.info();
        let part = Part::bytes(document.contents().to_vec())
            .file_name(info.name.clone())
            .mime_str(&info.media_type)?;
        let form = Form::new().part(FILE_FIELD, part);

        tracing::debug!(
            url = %self.upload_url,
            file = %info.name,
            bytes = info.size_bytes,
            "uploading document"
        );
        check_response(self.http.post(&self.upload_url).multipart(form).send().await?).await?;
        Ok(())
    }
}
