//! OpenAI-compatible chat completions client.
//!
//! The production [`CompletionProvider`]. Built once at startup from the
//! environment and shared read-only by every request.

use std::time::Duration;

use async_trait::async_trait;
use dg_core::{ChatMessage, CompletionProvider, CompletionRequest, ProviderError};
use serde::{Deserialize, Serialize};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "OPENAI_SECRET_KEY";

/// Environment variable overriding the API base URL.
pub const API_BASE_VAR: &str = "OPENAI_API_BASE";

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token sent with every request
    pub api_key: String,
    /// Base URL, without the `/chat/completions` suffix
    pub api_base: String,
    /// Request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config with the default base URL and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Read the config from environment variables.
    ///
    /// `OPENAI_SECRET_KEY` is required; `OPENAI_API_BASE` is optional.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|k| !k.trim().is_empty())
            .ok_or(ProviderError::MissingApiKey(API_KEY_VAR))?;

        let mut config = Self::new(api_key);
        if let Some(base) = lookup(API_BASE_VAR).filter(|b| !b.trim().is_empty()) {
            config.api_base = base;
        }
        Ok(config)
    }

    /// Override the base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl OpenAiClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::new(ClientConfig::from_env()?)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        let body = ChatCompletionBody {
            model: &request.model,
            messages: &request.messages,
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("No choices in response".to_string()))?;

        Ok(choice.message.content)
    }

    fn provider_name(&self) -> &str {
        "OpenAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{bearer_token, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenAiClient {
        let config = ClientConfig::new("sk-test").with_api_base(server.uri());
        OpenAiClient::new(config).unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest::instructed("gpt-3.5-turbo", "classify", "fn add(a, b) {}")
    }

    #[test]
    fn test_config_from_lookup() {
        let config = ClientConfig::from_lookup(|key| match key {
            API_KEY_VAR => Some("sk-abc".to_string()),
            API_BASE_VAR => Some("http://localhost:9999/v1".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.api_key, "sk-abc");
        assert_eq!(config.api_base, "http://localhost:9999/v1");
    }

    #[test]
    fn test_config_requires_api_key() {
        let missing = ClientConfig::from_lookup(|_| None);
        assert!(matches!(missing, Err(ProviderError::MissingApiKey(API_KEY_VAR))));

        let blank = ClientConfig::from_lookup(|_| Some("  ".to_string()));
        assert!(blank.is_err());
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(bearer_token("sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "classify"},
                    {"role": "user", "content": "fn add(a, b) {}"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-1",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Function"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server).complete(&request()).await.unwrap();
        assert_eq!(reply.as_deref(), Some("Function"));
    }

    #[tokio::test]
    async fn test_null_content_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let reply = client_for(&server).complete(&request()).await.unwrap();
        assert_eq!(reply, None);
    }

    #[tokio::test]
    async fn test_api_error_carries_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).complete(&request()).await.unwrap_err();
        match err {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("invalid api key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"choices": []}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let config = ClientConfig::new("sk-test")
            .with_api_base(server.uri())
            .with_timeout(Duration::from_millis(100));
        let err = OpenAiClient::new(config).unwrap().complete(&request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Http(_)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = ClientConfig::new("k").with_api_base("http://host/v1/");
        let client = OpenAiClient::new(config).unwrap();
        assert_eq!(client.endpoint(), "http://host/v1/chat/completions");
    }
}
