//! Google Generative Language API client.
//!
//! Speaks the `generateContent` REST endpoint with an API key supplied at
//! construction. The client is built once at startup and passed to the
//! pipeline; there is no ambient global configuration.
//!
//! Blocked prompts (safety filters) and empty candidate lists surface as
//! [`BackendError::Blocked`] / [`BackendError::Empty`] so the retry driver can
//! classify them; this client performs no retries of its own.

use async_trait::async_trait;
use formfill_domain::{BackendError, GenerativeBackend};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Default per-request timeout. Generative calls block the run for their full
/// round trip, so this is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// HTTP client for the Generative Language API.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

impl GeminiClient {
    /// Create a client for the default endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();
        Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API endpoint (used for test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Model identifier this client targets.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "issuing generateContent request");

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(BackendError::Transport(format!(
                "HTTP {status}: {}",
                detail.trim()
            )));
        }

        let decoded: GenerateResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Invalid(e.to_string()))?;
        text_from_response(decoded)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        self.generate_content(prompt).await
    }
}

/// Pull the response text out of the API envelope.
///
/// No candidates means the safety layer refused the prompt; an all-whitespace
/// answer counts as empty.
fn text_from_response(response: GenerateResponse) -> Result<String, BackendError> {
    if response.candidates.is_empty() {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "unspecified".to_string());
        warn!(%reason, "generative backend returned no candidates");
        return Err(BackendError::Blocked { reason });
    }

    let text: String = response.candidates[0]
        .content
        .as_ref()
        .map(|content| {
            content
                .parts
                .iter()
                .map(|part| part.text.as_str())
                .collect()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(BackendError::Empty);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_client_builder_overrides() {
        let client = GeminiClient::new("key").with_model("gemini-pro");
        assert_eq!(client.model(), "gemini-pro");
    }

    #[test]
    fn test_response_text_extracted() {
        let response = decode(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\": 1}"}]}}]}"#,
        );
        assert_eq!(text_from_response(response).unwrap(), r#"{"a": 1}"#);
    }

    #[test]
    fn test_multi_part_response_concatenated() {
        let response = decode(
            r#"{"candidates":[{"content":{"parts":[{"text":"foo"},{"text":"bar"}]}}]}"#,
        );
        assert_eq!(text_from_response(response).unwrap(), "foobar");
    }

    #[test]
    fn test_no_candidates_is_blocked_with_reason() {
        let response =
            decode(r#"{"candidates":[],"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert_eq!(
            text_from_response(response).unwrap_err(),
            BackendError::Blocked {
                reason: "SAFETY".to_string()
            }
        );
    }

    #[test]
    fn test_missing_candidates_field_is_blocked() {
        let response = decode(r#"{}"#);
        assert!(matches!(
            text_from_response(response).unwrap_err(),
            BackendError::Blocked { .. }
        ));
    }

    #[test]
    fn test_whitespace_only_text_is_empty() {
        let response =
            decode(r#"{"candidates":[{"content":{"parts":[{"text":"  \n "}]}}]}"#);
        assert_eq!(text_from_response(response).unwrap_err(), BackendError::Empty);
    }
}
