use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::LlmConfig,
    error::{ReceiptError, Result},
};

const SERVICE: &str = "OpenAI";

#[derive(Debug, Clone)]
struct ApiConfig {
    base_url: String,
    api_key: String,
    model: String,
    max_completion_tokens: u32,
}

#[derive(Clone, Debug)]
pub struct LlmApiClient {
    client: Client,
    config: ApiConfig,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_completion_tokens: u32,
}

impl LlmApiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ReceiptError::ConfigurationMissing("OpenAI API key".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| {
                ReceiptError::Internal(format!("Failed to create LLM HTTP client: {error}"))
            })?;

        Ok(Self {
            client,
            config: ApiConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                api_key,
                model: config.model.clone(),
                max_completion_tokens: config.max_completion_tokens,
            },
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send `prompt` as a single user message and return the first choice's
    /// content exactly as the model wrote it.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            max_completion_tokens: self.config.max_completion_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|error| {
                warn!(error = %error, "LLM request did not complete");
                if error.is_timeout() {
                    ReceiptError::Transport("LLM request timed out".to_string())
                } else {
                    ReceiptError::Transport(
                        "An error occurred while formatting the receipt text".to_string(),
                    )
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            warn!(error = %error, "Failed to read LLM response body");
            ReceiptError::Transport("An error occurred while formatting the receipt text".to_string())
        })?;

        if !status.is_success() {
            let message = upstream_message(&body);
            warn!(status = status.as_u16(), %message, "LLM API returned an error");
            return Err(ReceiptError::UpstreamHttp {
                service: SERVICE,
                status: status.as_u16(),
                message,
            });
        }

        let content = extract_content(&body)?;
        debug!(response_len = content.len(), "LLM response received");
        Ok(content)
    }
}

fn upstream_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(String::from)
        })
        .unwrap_or_else(|| "unknown error".to_string())
}

fn extract_content(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body).map_err(|error| {
        warn!(response_len = body.len(), error = %error, "LLM response is not JSON");
        ReceiptError::ResponseShape("LLM response format is invalid".to_string())
    })?;

    value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| {
            warn!(response_preview = %body.chars().take(200).collect::<String>(), "Unexpected LLM response shape");
            ReceiptError::ResponseShape("LLM response format is invalid".to_string())
        })
}
