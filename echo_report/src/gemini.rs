//! Gemini `generateContent` client.
//!
//! Built once at start-up from [`ReportConfig`] and handed to the report
//! service. Provider errors are flattened into one message that keeps the HTTP
//! status, the provider status, its message, and any `reason` codes, so that
//! [`crate::classify::classify`] can recognise them.

use async_trait::async_trait;
use echo_common::{EchoError, Result};
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::generator::{ProviderError, TextGenerator};

const USER_AGENT: &str = concat!("echoticker/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}

/// HTTP client for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl GeminiClient {
    /// Build a client from `config`. A missing key is allowed here and
    /// reported through [`TextGenerator::is_configured`].
    pub fn new(config: &ReportConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| EchoError::Config(format!("failed to build HTTP client: {e}")))?;
        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.api_base, config.model
        );
        info!("Gemini client ready for {}", config.model);

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint,
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn invoke(&self, prompt: &str) -> std::result::Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::new("credential not found"))?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!("POST {} ({} prompt bytes)", self.endpoint, prompt.len());
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::new(format!("request timeout: {e}"))
                } else if e.is_connect() {
                    ProviderError::new(format!("connection failed: {e}"))
                } else {
                    ProviderError::new(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::new(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(ProviderError::new(describe_error(status.as_u16(), &body)));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::new(format!("malformed response: {e}")))?;
        extract_text(parsed)
    }

    fn provider(&self) -> &str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Turn an error response into a single line, e.g.
/// `400 INVALID_ARGUMENT: API key not valid. [API_KEY_INVALID]`.
fn describe_error(http_status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let err = envelope.error;
            let reasons: Vec<String> = err.details.into_iter().filter_map(|d| d.reason).collect();
            let mut line = format!("{http_status} {}: {}", err.status, err.message);
            if !reasons.is_empty() {
                line.push_str(&format!(" [{}]", reasons.join(", ")));
            }
            line
        }
        Err(_) => format!("{http_status}: {}", body.trim()),
    }
}

fn extract_text(response: GenerateResponse) -> std::result::Result<String, ProviderError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if !text.is_empty() {
        return Ok(text);
    }
    match response.prompt_feedback.and_then(|f| f.block_reason) {
        Some(reason) => Err(ProviderError::new(format!("prompt blocked: {reason}"))),
        None => Err(ProviderError::new("empty response from model")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{ProviderFailure, classify};

    #[test]
    fn endpoint_combines_base_and_model() {
        let config = ReportConfig {
            api_key: Some("k".into()),
            ..ReportConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert!(client.is_configured());
    }

    #[test]
    fn request_body_matches_wire_format() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hi" }],
            }],
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"contents":[{"parts":[{"text":"hi"}]}]}"#
        );
    }

    #[test]
    fn joins_candidate_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}],"role":"model"}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(extract_text(parsed).unwrap(), "Hello world");
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let body = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            extract_text(parsed).unwrap_err().message(),
            "prompt blocked: SAFETY"
        );
    }

    #[test]
    fn invalid_key_body_classifies_as_credential_error() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT","details":[{"@type":"type.googleapis.com/google.rpc.ErrorInfo","reason":"API_KEY_INVALID"}]}}"#;
        let line = describe_error(400, body);
        assert_eq!(
            line,
            "400 INVALID_ARGUMENT: API key not valid. Please pass a valid API key. [API_KEY_INVALID]"
        );
        assert_eq!(classify(&line), ProviderFailure::InvalidCredential);
    }

    #[test]
    fn quota_body_classifies_as_quota() {
        let body = r#"{"error":{"code":429,"message":"You exceeded your current quota, please check your plan.","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(classify(&describe_error(429, body)), ProviderFailure::QuotaExceeded);
    }

    #[test]
    fn non_json_error_keeps_raw_body() {
        assert_eq!(describe_error(502, " Bad Gateway \n"), "502: Bad Gateway");
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = GeminiClient::new(&ReportConfig::default()).unwrap();
        assert!(!client.is_configured());
        let err = client.invoke("x").await.unwrap_err();
        assert_eq!(classify(err.message()), ProviderFailure::MissingCredential);
    }
}
