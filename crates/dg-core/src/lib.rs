//! # dg-core
//!
//! Core types for turning source snippets into structured documentation.
//!
//! ## Data Model
//!
//! | Type | Lifetime | Purpose |
//! |------|----------|---------|
//! | [`ArtifactKind`] | per request | Function, Component, or unrecognized |
//! | [`TargetLanguage`] | per request | Language of the generated prose |
//! | [`CompletionRequest`] | per provider call | Role-tagged messages + model id |
//! | [`ResponseEnvelope`] | per request | Uniform success/error result |
//!
//! Nothing here outlives a single request. The only shared handle is the
//! [`CompletionProvider`] itself, which is read-only after construction.

pub mod envelope;
pub mod kind;
pub mod provider;

pub use envelope::{ResponseEnvelope, ResponseError, ResponseStatus};
pub use kind::{ArtifactKind, LanguageParseError, TargetLanguage};
pub use provider::{ChatMessage, CompletionProvider, CompletionRequest, ProviderError, Role};
