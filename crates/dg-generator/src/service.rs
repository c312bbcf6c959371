//! Inbound handlers.
//!
//! The request/response surface exposed to callers. Every documentation
//! handler returns a JSON string that parses as a response envelope, even
//! on failure.

use std::sync::Arc;

use dg_core::{ArtifactKind, CompletionProvider, ProviderError, TargetLanguage};

use crate::client::OpenAiClient;
use crate::pipeline::{DocPipeline, PipelineConfig};

/// Documentation handlers around a shared pipeline.
pub struct DocService {
    pipeline: DocPipeline,
}

impl DocService {
    /// Create a service around an injected provider.
    pub fn new(provider: Arc<dyn CompletionProvider>, config: PipelineConfig) -> Self {
        Self {
            pipeline: DocPipeline::new(provider, config),
        }
    }

    /// Create with an OpenAI client configured from the environment.
    ///
    /// Fails at startup when the API key is missing.
    pub fn from_env(config: PipelineConfig) -> Result<Self, ProviderError> {
        let client = OpenAiClient::from_env()?;
        Ok(Self::new(Arc::new(client), config))
    }

    /// Liveness probe.
    pub fn hello_world(&self) -> &'static str {
        tracing::info!("Hello world request received");
        "Hello world!"
    }

    /// Document a snippet through the configured dispatch mode.
    ///
    /// With auto-detect off there is no kind to dispatch on, so this
    /// answers with an `InvalidKind` envelope; use [`Self::function_doc`]
    /// or [`Self::component_doc`] instead.
    pub async fn generate_doc(&self, language: TargetLanguage, code: &str) -> String {
        self.pipeline
            .generate_documentation(language, code, None)
            .await
            .to_json()
    }

    /// Document a snippet as a function.
    ///
    /// With auto-detect on the classifier still decides the kind.
    pub async fn function_doc(&self, language: TargetLanguage, code: &str) -> String {
        self.pipeline
            .generate_documentation(language, code, Some(ArtifactKind::Function))
            .await
            .to_json()
    }

    /// Document a snippet as a component.
    ///
    /// With auto-detect on the classifier still decides the kind.
    pub async fn component_doc(&self, language: TargetLanguage, code: &str) -> String {
        self.pipeline
            .generate_documentation(language, code, Some(ArtifactKind::Component))
            .await
            .to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::{ResponseEnvelope, ResponseError, ResponseStatus};
    use dg_sim::{Scripted, ScriptedProvider};
    use serde_json::json;

    use crate::prompt::PromptCatalog;

    const FUNCTION_DOC: &str =
        r#"{"name":"add","params":{"a":"x","b":"y"},"description":"Adds","usage":"add(1, 2)"}"#;

    fn parse(json: &str) -> ResponseEnvelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_hello_world() {
        let provider = Arc::new(ScriptedProvider::always(Scripted::Empty));
        let service = DocService::new(provider, PipelineConfig::default());
        assert_eq!(service.hello_world(), "Hello world!");
    }

    #[tokio::test]
    async fn test_generate_doc_auto_detect() {
        let provider = Arc::new(ScriptedProvider::replies(["Function", FUNCTION_DOC]));
        let service = DocService::new(provider, PipelineConfig::auto_detect());

        let json = service
            .generate_doc(TargetLanguage::En, "function add(a, b) { return a + b; }")
            .await;
        let envelope = parse(&json);

        assert_eq!(envelope.kind, ArtifactKind::Function);
        assert_eq!(envelope.status, ResponseStatus::Success);
        assert_eq!(envelope.data.unwrap()["name"], json!("add"));
    }

    #[tokio::test]
    async fn test_generate_doc_unclassifiable() {
        let provider = Arc::new(ScriptedProvider::replies(["None"]));
        let service = DocService::new(provider, PipelineConfig::auto_detect());

        let json = service.generate_doc(TargetLanguage::Ro, "SELECT 1;").await;
        assert_eq!(json, r#"{"type":"None","status":"Error","info":"InvalidKind"}"#);
    }

    #[tokio::test]
    async fn test_generate_doc_explicit_mode_is_invalid_kind() {
        let provider = Arc::new(ScriptedProvider::replies([FUNCTION_DOC]));
        let service = DocService::new(provider.clone(), PipelineConfig::explicit());

        let envelope = parse(&service.generate_doc(TargetLanguage::En, "fn f() {}").await);
        assert_eq!(envelope.info, Some(ResponseError::InvalidKind));
        assert_eq!(provider.calls_count(), 0);
    }

    #[tokio::test]
    async fn test_direct_handlers_skip_classification() {
        let provider = Arc::new(ScriptedProvider::new([
            Scripted::reply(FUNCTION_DOC),
            Scripted::reply("not json"),
        ]));
        let service = DocService::new(provider.clone(), PipelineConfig::explicit());

        let function = parse(&service.function_doc(TargetLanguage::En, "fn add(a, b) {}").await);
        assert!(function.is_success());
        assert_eq!(function.kind, ArtifactKind::Function);

        let component = parse(&service.component_doc(TargetLanguage::En, "<Card/>").await);
        assert_eq!(component.kind, ArtifactKind::Component);
        assert_eq!(component.info, Some(ResponseError::Parsing));

        assert_eq!(provider.calls_count(), 2);
    }

    #[tokio::test]
    async fn test_function_doc_follows_auto_detect_flag() {
        // Auto-detect on: the classifier runs and can reject the snippet
        let provider = Arc::new(ScriptedProvider::replies(["None", FUNCTION_DOC]));
        let service = DocService::new(provider.clone(), PipelineConfig::auto_detect());

        let json = service.function_doc(TargetLanguage::En, "SELECT 1;").await;
        assert_eq!(json, r#"{"type":"None","status":"Error","info":"InvalidKind"}"#);
        assert_eq!(provider.calls_count(), 1);
        assert_eq!(
            provider.requests()[0].system_content(),
            Some(PromptCatalog::decision_prompt())
        );

        // Auto-detect off: the caller's kind is trusted, no classification
        let provider = Arc::new(ScriptedProvider::replies([FUNCTION_DOC]));
        let service = DocService::new(provider.clone(), PipelineConfig::explicit());

        let envelope = parse(&service.function_doc(TargetLanguage::En, "SELECT 1;").await);
        assert_eq!(envelope.kind, ArtifactKind::Function);
        assert!(envelope.is_success());
        assert_eq!(provider.calls_count(), 1);
        assert_eq!(
            provider.requests()[0].system_content(),
            PromptCatalog::lookup(ArtifactKind::Function, TargetLanguage::En)
        );
    }

    #[tokio::test]
    async fn test_component_doc_uses_detected_kind() {
        let provider = Arc::new(ScriptedProvider::replies(["Function", FUNCTION_DOC]));
        let service = DocService::new(provider.clone(), PipelineConfig::auto_detect());

        let envelope = parse(&service.component_doc(TargetLanguage::En, "fn add(a, b) {}").await);
        assert_eq!(envelope.kind, ArtifactKind::Function);
        assert_eq!(provider.calls_count(), 2);
    }

    #[tokio::test]
    async fn test_provider_failure_still_returns_json() {
        let provider = Arc::new(ScriptedProvider::always(Scripted::Fail));
        let service = DocService::new(provider, PipelineConfig::explicit());

        let json = service.component_doc(TargetLanguage::En, "<Card/>").await;
        assert_eq!(json, r#"{"type":"Component","status":"Error","info":"ProviderEmpty"}"#);
    }
}
