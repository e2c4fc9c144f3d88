use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::types::{ChatMessage, ClientOptions, MessagesRequest, MessagesResponse};
use crate::{AgentError, Completer, Result};

// ─── AnthropicClient ──────────────────────────────────────────────────────

/// HTTP client for the Anthropic Messages API.
///
/// One request per completion: the system prompt goes in `system`, the
/// prompt is a single user message, and the text blocks of the reply are
/// joined into the returned string.
pub struct AnthropicClient {
    opts: ClientOptions,
    http: Client,
}

impl AnthropicClient {
    pub fn new(opts: ClientOptions) -> Result<Self> {
        if opts.api_key.trim().is_empty() {
            return Err(AgentError::NotConfigured("API key is empty".into()));
        }
        let http = Client::builder().timeout(opts.timeout).build()?;
        Ok(Self { opts, http })
    }

    pub fn model(&self) -> &str {
        &self.opts.model
    }

    /// Send a raw Messages API request.
    pub async fn send(&self, request: &MessagesRequest) -> Result<MessagesResponse> {
        let url = format!("{}/messages", self.opts.base_url.trim_end_matches('/'));
        debug!(url = %url, model = %request.model, "sending messages request");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.opts.api_key)
            .header("anthropic-version", &self.opts.api_version)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<MessagesResponse>().await?)
    }

    fn build_request(&self, system: &str, prompt: &str) -> MessagesRequest {
        MessagesRequest {
            model: self.opts.model.clone(),
            max_tokens: self.opts.max_tokens,
            system: (!system.is_empty()).then(|| system.to_string()),
            messages: vec![ChatMessage::user(prompt)],
            temperature: None,
        }
    }
}

#[async_trait]
impl Completer for AnthropicClient {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let request = self.build_request(system, prompt);
        let response = self.send(&request).await?;
        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = ?response.stop_reason,
            "messages response received"
        );
        response.text().ok_or(AgentError::EmptyResponse)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn opts(base_url: String) -> ClientOptions {
        ClientOptions {
            api_key: "test-key".into(),
            base_url,
            timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }

    #[test]
    fn empty_api_key_is_not_configured() {
        let err = AnthropicClient::new(ClientOptions::default()).err().unwrap();
        assert!(matches!(err, AgentError::NotConfigured(_)));
    }

    #[test]
    fn build_request_omits_empty_system() {
        let client = AnthropicClient::new(opts("http://localhost".into())).unwrap();
        let req = client.build_request("", "hi");
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("system").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
        assert_eq!(json["max_tokens"], 4096);
    }

    #[tokio::test]
    async fn complete_joins_text_blocks() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", "2023-06-01")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "id": "msg_1",
                    "model": "claude-3-5-sonnet-20241022",
                    "content": [
                        {"type": "text", "text": "{\"subject\": "},
                        {"type": "text", "text": "\"Hi\"}"}
                    ],
                    "stop_reason": "end_turn",
                    "usage": {"input_tokens": 12, "output_tokens": 5}
                }"#,
            )
            .create_async()
            .await;

        let client = AnthropicClient::new(opts(server.url())).unwrap();
        let text = client.complete("be brief", "say hi").await.unwrap();
        assert_eq!(text, r#"{"subject": "Hi"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/messages")
            .with_status(529)
            .with_body("overloaded")
            .create_async()
            .await;

        let client = AnthropicClient::new(opts(server.url())).unwrap();
        let err = client.complete("", "hello").await.unwrap_err();
        match err {
            AgentError::Api { status, body } => {
                assert_eq!(status, 529);
                assert_eq!(body, "overloaded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn response_without_text_is_empty_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/messages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content": [{"type": "tool_use", "id": "x", "name": "y", "input": {}}]}"#)
            .create_async()
            .await;

        let client = AnthropicClient::new(opts(server.url())).unwrap();
        let err = client.complete("", "hello").await.unwrap_err();
        assert!(matches!(err, AgentError::EmptyResponse));
    }
}
