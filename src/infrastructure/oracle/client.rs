use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::models::{OracleConfig, Speaker};
use crate::domain::ports::{Oracle, OracleRequest};

/// Environment variable the API key is read from. Never configured in a
/// file.
pub const API_KEY_ENV: &str = "RAPPORT_ORACLE_API_KEY";

/// HTTP client for an OpenAI-compatible chat completions endpoint.
pub struct HttpOracle {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
    max_tokens: usize,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl HttpOracle {
    pub fn new(config: &OracleConfig) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .with_context(|| format!("{API_KEY_ENV} is not set"))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl Oracle for HttpOracle {
    async fn complete(&self, request: OracleRequest) -> Result<String> {
        let mut messages = Vec::with_capacity(request.transcript.len() + 1);
        messages.push(WireMessage { role: "system", content: &request.system });
        for turn in &request.transcript {
            messages.push(WireMessage {
                role: match turn.speaker {
                    Speaker::User => "user",
                    Speaker::Assistant => "assistant",
                },
                content: &turn.text,
            });
        }

        let body = CompletionBody {
            model: &self.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(model = %self.model, turns = request.transcript.len(), "oracle call");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("oracle request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("oracle returned {status}: {detail}");
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .context("failed to decode oracle response")?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        Ok(content)
    }
}
