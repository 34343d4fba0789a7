use crate::error::Error;
use crate::gateway::http::build_retrying_client;
use async_trait::async_trait;
use intake_ai::{CompletionRequest, Error as IntakeAiError, Provider};
use log::*;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, RETRY_AFTER};
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use service::config::Config;
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";

// Used when a 429 arrives without a parseable retry-after header
const DEFAULT_RETRY_AFTER_SECONDS: u64 = 60;

/// Anthropic Messages API client used as the interview's language model.
pub struct AnthropicClient {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl AnthropicClient {
    /// Builds the client from `config`. A missing API key is not an error here;
    /// it surfaces as a configuration error on the first completion so the
    /// server can still start and serve everything that doesn't need the model.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = build_retrying_client(
            Duration::from_secs(config.llm_timeout_secs),
            config.llm_max_retries,
        )?;

        if config.anthropic_api_key().is_none() {
            warn!("ANTHROPIC_API_KEY is not set, AI follow-up questions and reports will fail");
        }

        Ok(Self {
            client,
            base_url: config.anthropic_base_url().trim_end_matches('/').to_string(),
            api_key: config.anthropic_api_key(),
        })
    }

    fn headers(&self) -> Result<HeaderMap, IntakeAiError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            warn!("Failed to get Anthropic API key from config");
            IntakeAiError::Configuration("ANTHROPIC_API_KEY is not set".to_string())
        })?;

        let mut api_key_header = HeaderValue::from_str(api_key).map_err(|err| {
            warn!("Failed to create x-api-key header value: {err:?}");
            IntakeAiError::Configuration("ANTHROPIC_API_KEY is not a valid header value".to_string())
        })?;
        api_key_header.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", api_key_header);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl Provider for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, IntakeAiError> {
        let headers = self.headers()?;
        let url = format!("{}/messages", self.base_url);
        let body = MessagesRequest {
            model: &request.model_id,
            max_tokens: request.max_tokens,
            messages: [Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        debug!(
            "Sending {} byte prompt to {} ({})",
            request.prompt.len(),
            url,
            request.model_id
        );

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to send Anthropic request: {e:?}");
                match e {
                    reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => {
                        IntakeAiError::Timeout(e.to_string())
                    }
                    e => IntakeAiError::Network(e.to_string()),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok());
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&error_text)
                .map(|body| body.error.message)
                .unwrap_or(error_text);
            warn!("Anthropic request failed: {status} - {message}");

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    IntakeAiError::Authentication(message)
                }
                StatusCode::TOO_MANY_REQUESTS => IntakeAiError::RateLimited {
                    retry_after_seconds: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECONDS),
                },
                StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                    IntakeAiError::Timeout(message)
                }
                _ => IntakeAiError::Provider(format!("{status}: {message}")),
            });
        }

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read Anthropic response body: {e:?}");
            IntakeAiError::Network(e.to_string())
        })?;
        let parsed: MessagesResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Anthropic response is not a Messages response: {e}");
            IntakeAiError::MalformedResponse(format!("unexpected response body: {e}"))
        })?;

        if parsed.stop_reason.as_deref() == Some("max_tokens") {
            warn!("Anthropic reply was truncated at {} tokens", request.max_tokens);
        }

        let text: String = parsed
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Unsupported => None,
            })
            .collect();

        if text.trim().is_empty() {
            warn!("Anthropic response contained no text");
            return Err(IntakeAiError::MalformedResponse(
                "response contained no text".to_string(),
            ));
        }

        Ok(text)
    }

    fn provider_id(&self) -> &'static str {
        "anthropic"
    }
}
