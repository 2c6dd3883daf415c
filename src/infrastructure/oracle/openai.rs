//! OpenAI chat completions oracle adapter

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ports::{CompletionOracle, CompletionRequest, OracleError};
use crate::domain::config::DEFAULT_API_BASE_URL;

// Request types for the chat completions API

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    response_format: ResponseFormat,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

// Response types for the chat completions API

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// OpenAI-compatible completion oracle
pub struct OpenAiOracle {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiOracle {
    /// Create an oracle against the public OpenAI API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE_URL)
    }

    /// Create an oracle against a custom OpenAI-compatible endpoint
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Bound every oracle call by `timeout`. Without this, calls never time out.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, OracleError> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::RequestFailed(e.to_string()))?;
        Ok(self)
    }

    /// Build the chat completions URL
    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Build the request body
    fn build_body(request: &CompletionRequest) -> ChatCompletionBody<'_> {
        ChatCompletionBody {
            model: &request.model,
            response_format: ResponseFormat {
                kind: request.response_mode.as_str(),
            },
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        }
    }

    /// Take the first choice's content, untouched. An empty string is
    /// still content; only a missing choice or a `null` content is not.
    fn extract_text(response: ChatCompletionResponse) -> Option<String> {
        response.choices?.into_iter().next()?.message?.content
    }

    /// Provider message from an error body: `error.message` when the body is
    /// an OpenAI error envelope, otherwise the body text itself.
    fn provider_message(status: reqwest::StatusCode, body: &str) -> String {
        let from_envelope = serde_json::from_str::<ChatCompletionResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .map(|e| e.message);

        match from_envelope {
            Some(message) if !message.is_empty() => message,
            _ if !body.trim().is_empty() => body.trim().to_string(),
            _ => status
                .canonical_reason()
                .unwrap_or("no response body")
                .to_string(),
        }
    }
}

#[async_trait]
impl CompletionOracle for OpenAiOracle {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, OracleError> {
        let body = Self::build_body(request);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| OracleError::RequestFailed(e.to_string()))?;

        let status = response.status();
        debug!(%status, model = %request.model, "Chat completion response");

        // Handle HTTP errors
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED => {
                    OracleError::InvalidApiKey(Self::provider_message(status, &error_text))
                }
                reqwest::StatusCode::TOO_MANY_REQUESTS => {
                    OracleError::RateLimited(Self::provider_message(status, &error_text))
                }
                _ => OracleError::ApiError(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| OracleError::ParseError(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(OracleError::ApiError(error.message));
        }

        Self::extract_text(response).ok_or(OracleError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ExtractionPipeline;
    use crate::domain::analysis::PromptProfile;

    #[test]
    fn body_carries_json_object_hint_and_ordered_messages() {
        let request = ExtractionPipeline::build_request("Unit Alpha", &PromptProfile::overview());
        let body = serde_json::to_value(OpenAiOracle::build_body(&request)).unwrap();

        assert_eq!(body["model"], "chatgpt-4o-latest");
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Unit Alpha");
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn endpoint_joins_base_url() {
        let oracle = OpenAiOracle::with_base_url("key", "http://localhost:8080/v1/");
        assert_eq!(oracle.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(
            OpenAiOracle::new("key").endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn extract_text_keeps_whitespace() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":" {\"a\":1}\n"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            OpenAiOracle::extract_text(response),
            Some(" {\"a\":1}\n".to_string())
        );
    }

    #[test]
    fn extract_text_empty_response() {
        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(OpenAiOracle::extract_text(response).is_none());

        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(OpenAiOracle::extract_text(response).is_none());
    }

    #[test]
    fn extract_text_keeps_empty_string() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":""}}]}"#).unwrap();
        assert_eq!(OpenAiOracle::extract_text(response), Some(String::new()));
    }

    #[test]
    fn provider_message_prefers_error_envelope() {
        let status = reqwest::StatusCode::UNAUTHORIZED;
        assert_eq!(
            OpenAiOracle::provider_message(
                status,
                r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#
            ),
            "Incorrect API key provided"
        );
        assert_eq!(
            OpenAiOracle::provider_message(status, " gateway says no \n"),
            "gateway says no"
        );
        assert_eq!(OpenAiOracle::provider_message(status, ""), "Unauthorized");
    }

    #[test]
    fn with_timeout_builds_client() {
        assert!(OpenAiOracle::new("key")
            .with_timeout(Duration::from_secs(30))
            .is_ok());
    }
}
