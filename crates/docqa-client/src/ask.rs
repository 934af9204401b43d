//! Question call.

use reqwest::multipart::Form;

use crate::{HttpAnalysisClient, error::ServiceError, http::check_response};

/// Multipart field carrying the question text.
const QUESTION_FIELD: &str = "question";

#[derive(serde::Deserialize)]
struct AskResponse {
    #[serde(default)]
    answer: Option<serde_json::Value>,
}

impl AskResponse {
    /// The answer text, if the service produced one.
    ///
    /// Non-string answers are rendered as JSON text rather than dropped.
    fn into_answer(self) -> Option<String> {
        let text = match self.answer? {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        };
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

impl HttpAnalysisClient {
    /// Ask `question` about the uploaded document.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the request fails or the service returns a
    /// non-success status. A success reply whose body is not a JSON object
    /// yields `Ok(None)`, the same as a reply without an answer.
    pub async fn ask_question(&self, question: &str) -> Result<Option<String>, ServiceError> {
        let form = Form::new().text(QUESTION_FIELD, question.to_string());

        tracing::debug!(url = %self.ask_url, chars = question.len(), "asking question");
        let resp = check_response(self.http.post(&self.ask_url).multipart(form).send().await?).await?;

        let body = resp.text().await?;
        match serde_json::from_str::<AskResponse>(&body) {
            Ok(data) => Ok(data.into_answer()),
            Err(error) => {
                // Any success reply counts; an unreadable body just carries no answer.
                tracing::warn!(%error, bytes = body.len(), "ask reply is not a JSON object");
                Ok(None)
            }
        }
    }
}
