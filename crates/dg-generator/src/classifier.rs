//! Snippet classification.
//!
//! One provider call per snippet. No retries, no confidence scoring: the
//! reply is either exactly `Function`, exactly `Component`, or `None`.

use std::sync::Arc;

use dg_core::{ArtifactKind, CompletionProvider, CompletionRequest};

use crate::prompt::PromptCatalog;

/// Decides whether a snippet is a function or a component.
pub struct Classifier {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl Classifier {
    /// Create a new classifier.
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Classify a snippet.
    ///
    /// A failed call or an empty reply is `ArtifactKind::None`.
    pub async fn classify(&self, source: &str) -> ArtifactKind {
        let request =
            CompletionRequest::instructed(&self.model, PromptCatalog::decision_prompt(), source);

        let reply = match self.provider.complete(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.provider_name(),
                    error = %e,
                    "Classification call failed"
                );
                None
            }
        };

        let kind = reply.as_deref().map_or(ArtifactKind::None, ArtifactKind::from_reply);
        tracing::debug!(reply = ?reply, kind = %kind, "Classified snippet");
        kind
    }
}
