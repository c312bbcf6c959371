//! The completion provider contract.
//!
//! A provider takes an ordered list of role-tagged messages plus a model
//! identifier and answers with a single text completion, or with nothing.
//! The pipeline never talks HTTP itself; a provider is constructed once at
//! startup and injected.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One provider call: model plus ordered messages.
///
/// Built fresh for every call and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// Build the canonical `[system, user]` request: an instruction and the
    /// payload it applies to.
    #[must_use]
    pub fn instructed(
        model: impl Into<String>,
        instruction: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(instruction), ChatMessage::user(payload)],
        }
    }

    /// Content of the system message, if any.
    pub fn system_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
    }

    /// Content of the last user message, if any.
    pub fn user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

/// Provider errors.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// External text-completion service.
///
/// `Ok(None)` means the provider answered but produced no content; callers
/// treat it the same as an empty string.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one request and return the completion text.
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError>;

    /// Get the provider name (for logs).
    fn provider_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl CompletionProvider for Echo {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<Option<String>, ProviderError> {
            Ok(request.user_content().map(str::to_string))
        }

        fn provider_name(&self) -> &str {
            "echo"
        }
    }

    #[test]
    fn test_instructed_request_order() {
        let request = CompletionRequest::instructed("gpt-3.5-turbo", "do it", "fn x() {}");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.system_content(), Some("do it"));
        assert_eq!(request.user_content(), Some("fn x() {}"));
    }

    #[test]
    fn test_role_wire_format() {
        let json = serde_json::to_string(&ChatMessage::system("s")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"s"}"#);
    }

    #[tokio::test]
    async fn test_provider_is_object_safe() {
        let provider: std::sync::Arc<dyn CompletionProvider> = std::sync::Arc::new(Echo);
        let request = CompletionRequest::instructed("m", "sys", "hello");
        let reply = provider.complete(&request).await.unwrap();
        assert_eq!(reply.as_deref(), Some("hello"));
        assert_eq!(provider.provider_name(), "echo");
    }

    #[test]
    fn test_error_display() {
        let err = ProviderError::Api {
            status: 429,
            message: "slow down".to_string(),
        };
        assert_eq!(err.to_string(), "API error (429): slow down");
    }
}
