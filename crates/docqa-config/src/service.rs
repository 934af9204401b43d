//! Document Analysis Service endpoint configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_upload_path() -> String {
    "/upload_pdf/".to_string()
}

fn default_ask_path() -> String {
    "/ask_question/".to_string()
}

/// Default request timeout. Answers come from an LLM, so this is generous.
const fn default_timeout_secs() -> u64 {
    120
}

fn default_user_agent() -> String {
    "docqa/0.1".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Scheme, host and port of the service (e.g., `http://127.0.0.1:8000`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the multipart upload endpoint.
    #[serde(default = "default_upload_path")]
    pub upload_path: String,

    /// Path of the question endpoint.
    #[serde(default = "default_ask_path")]
    pub ask_path: String,

    /// Whole-request timeout applied by the HTTP transport.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            upload_path: default_upload_path(),
            ask_path: default_ask_path(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ServiceConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of the upload endpoint.
    #[must_use]
    pub fn upload_url(&self) -> String {
        join_url(&self.base_url, &self.upload_path)
    }

    /// Full URL of the ask endpoint.
    #[must_use]
    pub fn ask_url(&self) -> String {
        join_url(&self.base_url, &self.ask_path)
    }

    /// Reject values the HTTP client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a base URL that is not
    /// `http://` or `https://`, or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "service.base_url".to_string(),
                reason: format!("expected an http(s) URL, got '{}'", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "service.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim().trim_end_matches('/'),
        path.trim().trim_start_matches('/')
    )
}
