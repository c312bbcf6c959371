//! Top-level dispatch.
//!
//! One entry point, two modes:
//! - **auto-detect**: classify first, then document the detected kind
//! - **explicit**: the caller names the kind, no classification call
//!
//! Either way the result is a well-formed envelope; unrecognized kinds end
//! in `InvalidKind` without reaching the doc generator.

use std::sync::Arc;

use dg_core::{ArtifactKind, CompletionProvider, ResponseEnvelope, ResponseError, TargetLanguage};

use crate::classifier::Classifier;
use crate::generator::{DocGenerator, SchemaPolicy};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Model identifier sent with every provider call
    pub model: String,
    /// Whether the snippet is classified before documentation
    pub auto_detect: bool,
    /// How strictly provider replies are checked
    pub schema_policy: SchemaPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            auto_detect: true,
            schema_policy: SchemaPolicy::PassThrough,
        }
    }
}

impl PipelineConfig {
    /// Classify every snippet before documenting it.
    pub fn auto_detect() -> Self {
        Self::default()
    }

    /// Trust the kind supplied by the caller.
    pub fn explicit() -> Self {
        Self {
            auto_detect: false,
            ..Default::default()
        }
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a different schema policy.
    pub fn with_schema_policy(mut self, schema_policy: SchemaPolicy) -> Self {
        self.schema_policy = schema_policy;
        self
    }
}

/// Classify-then-generate documentation pipeline.
///
/// Holds only the shared provider handle and immutable config, so one
/// pipeline can serve any number of concurrent requests.
pub struct DocPipeline {
    classifier: Classifier,
    generator: DocGenerator,
    config: PipelineConfig,
}

impl DocPipeline {
    /// Create a new pipeline around an injected provider.
    pub fn new(provider: Arc<dyn CompletionProvider>, config: PipelineConfig) -> Self {
        let classifier = Classifier::new(Arc::clone(&provider), config.model.clone());
        let generator = DocGenerator::new(provider, config.model.clone(), config.schema_policy);

        Self {
            classifier,
            generator,
            config,
        }
    }

    /// Generate documentation for a snippet.
    ///
    /// With auto-detect on, `kind` is ignored and the classifier decides.
    /// With auto-detect off, `kind` must name a function or component;
    /// anything else is `InvalidKind` and no provider call is made.
    pub async fn generate_documentation(
        &self,
        language: TargetLanguage,
        source: &str,
        kind: Option<ArtifactKind>,
    ) -> ResponseEnvelope {
        let kind = if self.config.auto_detect {
            if let Some(hint) = kind {
                tracing::debug!(hint = %hint, "Ignoring caller kind, auto-detect is on");
            }
            self.classifier.classify(source).await
        } else {
            kind.unwrap_or(ArtifactKind::None)
        };

        if !kind.is_documentable() {
            tracing::info!(
                language = %language,
                auto_detect = self.config.auto_detect,
                "Rejected snippet of unknown kind"
            );
            return ResponseEnvelope::error(ArtifactKind::None, ResponseError::InvalidKind);
        }

        self.generator.generate(kind, language, source).await
    }
}
