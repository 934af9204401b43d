//! Session controller settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_fallback_answer() -> String {
    "No answer received".to_string()
}

const fn default_event_capacity() -> usize {
    64
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Recorded as the answer when the service replies without one.
    #[serde(default = "default_fallback_answer")]
    pub fallback_answer: String,

    /// Buffered state-change notifications per subscriber before it lags.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fallback_answer: default_fallback_answer(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl SessionConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty fallback answer or
    /// a zero event capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_answer.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "session.fallback_answer".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.event_capacity".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
