use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ClientError;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: &str) -> Self {
        Self {
            role: ChatRole::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatTurn],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[async_trait]
pub trait AssistantClient: Send + Sync {
    async fn complete(&self, system: &str, history: &[ChatTurn]) -> Result<String, ClientError>;
}

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl AnthropicClient {
    pub fn new(api_key: Option<String>, model: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key,
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl AssistantClient for AnthropicClient {
    async fn complete(&self, system: &str, history: &[ChatTurn]) -> Result<String, ClientError> {
        let Some(api_key) = &self.api_key else {
            return Err(ClientError::MissingCredential("ANTHROPIC_API_KEY"));
        };
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: history,
        };
        debug!(model = %self.model, turns = history.len(), "sending assistant request");

        let response = self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?; // read the body once

        if !status.is_success() {
            warn!(status = status.as_u16(), "assistant request rejected");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: MessagesResponse = serde_json::from_str(&text)?;
        parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
            .ok_or(ClientError::Empty("assistant"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_roles_in_lowercase() {
        let history = vec![ChatTurn::user("hi"), ChatTurn::assistant("hello")];
        let request = MessagesRequest {
            model: "m",
            max_tokens: MAX_TOKENS,
            system: "sys",
            messages: &history,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][1]["role"], "assistant");
        assert_eq!(value["system"], "sys");
        assert_eq!(value["max_tokens"], 1000);
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = AnthropicClient::new(None, "m", Duration::from_secs(1)).unwrap();
        let err = client.complete("sys", &[ChatTurn::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingCredential("ANTHROPIC_API_KEY")));
    }
}
