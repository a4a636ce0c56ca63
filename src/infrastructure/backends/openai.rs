#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::CompletionError;
use crate::domain::models::RATE_LIMIT_CODE;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    message: CompletionMessageResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorDetailResponse {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    error: ErrorDetailResponse,
}

impl ErrorResponse {
    fn into_completion_error(self, status: u16) -> CompletionError {
        let is_rate_limit = self
            .error
            .code
            .as_ref()
            .and_then(|code| return code.as_str())
            .map(|code| return code == RATE_LIMIT_CODE)
            .unwrap_or(false);

        if is_rate_limit {
            return CompletionError::RateLimited;
        }

        if let Some(message) = self.error.message {
            if !message.trim().is_empty() {
                return CompletionError::Api(message);
            }
        }

        return CompletionError::Transport(format!("status {status} without an error message"));
    }
}

pub struct OpenAI {
    url: String,
    token: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAI {
    pub fn new(config: &Config) -> Result<OpenAI> {
        let max_tokens = config.get(ConfigKey::MaxTokens);
        let temperature = config.get(ConfigKey::Temperature);

        return Ok(OpenAI {
            url: config.get(ConfigKey::OpenAiURL).trim_end_matches('/').to_string(),
            token: config.get(ConfigKey::OpenAiToken),
            model: config.get(ConfigKey::Model),
            max_tokens: max_tokens
                .parse::<u32>()
                .with_context(|| return format!("Invalid max-tokens value: {max_tokens}"))?,
            temperature: temperature
                .parse::<f32>()
                .with_context(|| return format!("Invalid temperature value: {temperature}"))?,
        });
    }
}

#[async_trait]
impl Backend for OpenAI {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("OpenAI URL is not defined");
        }
        if self.token.is_empty() {
            bail!("OpenAI token is not defined. Set it with --openai-token or PROMPTPAD_OPENAI_TOKEN");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, prompt: BackendPrompt) -> Result<String, CompletionError> {
        let req = CompletionRequest {
            model: self.model.to_string(),
            messages: vec![MessageRequest {
                role: "user".to_string(),
                content: prompt.text,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/chat/completions", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&req)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, "OpenAI is not reachable");
                return CompletionError::Transport(err.to_string());
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| return CompletionError::Transport(err.to_string()))?;

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                "Failed to make completion request to OpenAI"
            );

            return match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err_res) => Err(err_res.into_completion_error(status.as_u16())),
                Err(_) => Err(CompletionError::Transport(format!(
                    "status {} with an unreadable body",
                    status.as_u16()
                ))),
            };
        }

        tracing::debug!(body = %body, "Completion response");
        let ores = serde_json::from_str::<CompletionResponse>(&body)
            .map_err(|err| return CompletionError::MalformedResponse(err.to_string()))?;

        return ores
            .choices
            .into_iter()
            .next()
            .and_then(|choice| return choice.message.content)
            .ok_or_else(|| {
                return CompletionError::MalformedResponse(
                    "response contained no choices".to_string(),
                );
            });
    }
}
