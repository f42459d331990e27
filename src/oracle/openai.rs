use super::Oracle;
use crate::config::OracleConfig;
use crate::error::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Oracle backed by an OpenAI-compatible chat-completions endpoint
pub struct OpenAiOracle {
    api_key: String,
    http: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OpenAiOracle {
    /// Build a client; the API key is passed in, never looked up
    pub fn new(config: &OracleConfig, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScoutError::Config(format!("failed to build oracle client: {}", e)))?;

        Ok(Self {
            api_key: api_key.into(),
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| ScoutError::Config("API key is not a valid header value".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl Oracle for OpenAiOracle {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        ::log::debug!(
            "Oracle request to {} (model {}, {} prompt chars)",
            url,
            self.model,
            prompt.chars().count()
        );

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| ScoutError::Oracle(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoutError::Oracle(format!("API error ({}): {}", status, body)));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ScoutError::Oracle(format!("malformed response: {}", e)))?;

        let choice = chat
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ScoutError::Oracle("no choices in response".to_string()))?;

        choice
            .message
            .content
            .map(|content| content.trim().to_string())
            .ok_or_else(|| ScoutError::Oracle("empty message content".to_string()))
    }
}
