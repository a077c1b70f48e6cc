//! Ollama HTTP client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use chatui_core::transcript::Message;

use crate::base::{ChatProvider, ProviderError, ProviderResult};

/// Ollama chat API request format
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

/// Ollama chat API response format
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Ollama provider client
pub struct OllamaClient {
    client: Client,
    api_base: String,
    model: String,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(api_base: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .http1_only() // Force HTTP/1.1 to avoid issues with some local servers
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl ChatProvider for OllamaClient {
    async fn complete(&self, messages: &[Message]) -> ProviderResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
        };

        let url = format!("{}/api/chat", self.api_base);
        debug!("Sending chat request to {} with model {}", url, self.model);

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Api(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        let data: ChatResponse = serde_json::from_str(&body)?;

        if data.message.content.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "Reply carried no content".to_string(),
            ));
        }

        Ok(data.message.content)
    }

    fn default_model(&self) -> String {
        self.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation() -> Vec<Message> {
        vec![Message::system("be brief"), Message::user("hello")]
    }

    #[tokio::test]
    async fn test_complete_returns_reply_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"model":"llama3.2","message":{"role":"assistant","content":"hi there"},"done":true}"#,
            )
            .create_async()
            .await;

        let client = OllamaClient::new(server.url(), "llama3.2");
        let reply = client.complete(&conversation()).await.unwrap();

        assert_eq!(reply, "hi there");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_maps_http_failure_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(500)
            .with_body("model not found")
            .create_async()
            .await;

        let client = OllamaClient::new(server.url(), "llama3.2");
        let err = client.complete(&conversation()).await.unwrap_err();

        assert!(matches!(err, ProviderError::Api(_)));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_complete_rejects_empty_reply() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"message":{"role":"assistant","content":""}}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(server.url(), "llama3.2");
        let err = client.complete(&conversation()).await.unwrap_err();

        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_complete_rejects_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = OllamaClient::new(server.url(), "llama3.2");
        let err = client.complete(&conversation()).await.unwrap_err();

        assert!(matches!(err, ProviderError::Json(_)));
    }
}
