//! Documentation generation.
//!
//! Selects the template for (kind, language), makes exactly one provider
//! call, and folds the reply into a [`ResponseEnvelope`].

use std::sync::Arc;

use dg_core::{
    ArtifactKind, CompletionProvider, CompletionRequest, ResponseEnvelope, ResponseError,
    TargetLanguage,
};
use serde_json::Value;

use crate::prompt::{strip_code_fence, PromptCatalog};

/// How much of the parsed reply is checked before it is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaPolicy {
    /// Any JSON value is accepted verbatim
    #[default]
    PassThrough,
    /// The reply must be an object holding the kind's documentation keys
    RequireKeys,
}

impl SchemaPolicy {
    /// Whether `data` is acceptable documentation for `kind`.
    pub fn accepts(&self, kind: ArtifactKind, data: &Value) -> bool {
        match self {
            SchemaPolicy::PassThrough => true,
            SchemaPolicy::RequireKeys => match data.as_object() {
                Some(object) => PromptCatalog::required_keys(kind)
                    .iter()
                    .all(|key| object.contains_key(*key)),
                None => false,
            },
        }
    }
}

/// Turn a provider reply into an envelope.
///
/// - `ArtifactKind::None`: `InvalidKind`, the reply is ignored
/// - no reply, or an empty one: `ProviderEmpty`
/// - not JSON (after stripping a code fence), or JSON `null`: `Parsing`
/// - JSON rejected by `policy`: `Parsing`
/// - otherwise: success with the parsed value attached verbatim
pub fn parse_reply(
    kind: ArtifactKind,
    reply: Option<&str>,
    policy: SchemaPolicy,
) -> ResponseEnvelope {
    if !kind.is_documentable() {
        return ResponseEnvelope::error(kind, ResponseError::InvalidKind);
    }

    let text = match reply {
        Some(text) if !text.is_empty() => text,
        _ => return ResponseEnvelope::error(kind, ResponseError::ProviderEmpty),
    };

    let data: Value = match serde_json::from_str(strip_code_fence(text)) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(kind = %kind, error = %e, "Reply is not valid JSON");
            return ResponseEnvelope::error(kind, ResponseError::Parsing);
        }
    };

    // A success envelope always carries data
    if data.is_null() {
        tracing::warn!(kind = %kind, "Reply is JSON null");
        return ResponseEnvelope::error(kind, ResponseError::Parsing);
    }

    if !policy.accepts(kind, &data) {
        tracing::warn!(kind = %kind, "Reply is missing documentation keys");
        return ResponseEnvelope::error(kind, ResponseError::Parsing);
    }

    ResponseEnvelope::success(kind, data)
}

/// Generates documentation for an already-classified snippet.
pub struct DocGenerator {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    schema_policy: SchemaPolicy,
}

impl DocGenerator {
    /// Create a new generator.
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        model: impl Into<String>,
        schema_policy: SchemaPolicy,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            schema_policy,
        }
    }

    /// Generate documentation for `source`.
    ///
    /// `ArtifactKind::None` yields an `InvalidKind` error without calling
    /// the provider.
    pub async fn generate(
        &self,
        kind: ArtifactKind,
        language: TargetLanguage,
        source: &str,
    ) -> ResponseEnvelope {
        let Some(template) = PromptCatalog::lookup(kind, language) else {
            return ResponseEnvelope::error(kind, ResponseError::InvalidKind);
        };

        let request = CompletionRequest::instructed(&self.model, template, source);
        let reply = match self.provider.complete(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.provider_name(),
                    kind = %kind,
                    error = %e,
                    "Documentation call failed"
                );
                None
            }
        };

        tracing::debug!(
            kind = %kind,
            language = %language,
            model = %self.model,
            request = source,
            response = ?reply,
            "Documentation exchange"
        );

        let envelope = parse_reply(kind, reply.as_deref(), self.schema_policy);
        tracing::debug!(
            kind = %kind,
            status = ?envelope.status,
            info = ?envelope.info,
            "Documentation generated"
        );
        envelope
    }
}
