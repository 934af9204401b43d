//! # docqa-client
//!
//! Client side of the Document Analysis Service contract.
//!
//! The service exposes two calls:
//! - `POST upload`: multipart form, one file field named `file`
//! - `POST ask`: multipart form, one text field named `question`;
//!   replies `{"answer": "..."}`
//!
//! [`AnalysisService`] is the seam the session controller talks through;
//! [`HttpAnalysisClient`] is the reqwest implementation.

mod ask;
mod error;
mod http;
mod upload;

pub use error::ServiceError;

use std::future::Future;

use docqa_config::ServiceConfig;
use docqa_core::Document;

// ── Contract ───────────────────────────────────────────────────────

/// The two-call contract of the Document Analysis Service.
pub trait AnalysisService: Send + Sync {
    /// Send the document bytes. Any success status means the document is
    /// ready for questions; the response body is not consumed.
    fn upload(&self, document: &Document) -> impl Future<Output = Result<(), ServiceError>> + Send;

    /// Ask a question about the uploaded document.
    ///
    /// Returns `Ok(None)` when the service replied successfully but without
    /// a usable answer (missing, null or blank).
    fn ask(&self, question: &str)
    -> impl Future<Output = Result<Option<String>, ServiceError>> + Send;
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the Document Analysis Service.
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    http: reqwest::Client,
    upload_url: String,
    ask_url: String,
}

impl HttpAnalysisClient {
    /// Build a client for the configured endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidEndpoint`] if the configuration fails
    /// validation, or [`ServiceError::Http`] if the underlying
    /// `reqwest::Client` cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        config
            .validate()
            .map_err(|e| ServiceError::InvalidEndpoint(e.to_string()))?;
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            upload_url: config.upload_url(),
            ask_url: config.ask_url(),
        })
    }

    #[must_use]
    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    #[must_use]
    pub fn ask_url(&self) -> &str {
        &self.ask_url
    }
}

impl AnalysisService for HttpAnalysisClient {
    async fn upload(&self, document: &Document) -> Result<(), ServiceError> {
        self.upload_document(document).await
    }

    async fn ask(&self, question: &str) -> Result<Option<String>, ServiceError> {
        self.ask_question(question).await
    }
}
