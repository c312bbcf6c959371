//! # dg-generator
//!
//! LLM-powered documentation for functions and UI components.
//!
//! A snippet goes in, a JSON response envelope comes out. The language
//! model does the writing; this crate picks the prompt, makes the calls,
//! and turns whatever comes back into a predictable shape.
//!
//! # Usage
//!
//! ```bash
//! # Detect the kind and document in English
//! OPENAI_SECRET_KEY=sk-... cargo run -p dg-generator -- src/button.tsx
//!
//! # Document a known function in Romanian
//! cargo run -p dg-generator -- --kind function --language ro src/add.js
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Snippet   │ ──> │ Classifier  │ ──> │ Completion  │
//! │             │     │ (decision)  │     │  Provider   │
//! └─────────────┘     └──────┬──────┘     └─────────────┘
//!                            │
//!           ┌────────────────┼────────────────┐
//!           ▼                ▼                ▼
//!      Function          Component           None
//!           │                │                │
//!           └───────┬────────┘                │
//!                   ▼                         │
//!            ┌─────────────┐                  │
//!            │    Doc      │  (prompt from    │
//!            │  Generator  │   the catalog)   │
//!            └──────┬──────┘                  │
//!                   ▼                         ▼
//!            ┌──────────────────────────────────┐
//!            │        Response Envelope         │
//!            │ {type, status, data?, info?}     │
//!            └──────────────────────────────────┘
//! ```
//!
//! With auto-detect off the classifier is skipped and the caller names the
//! kind.

pub mod classifier;
pub mod client;
pub mod generator;
pub mod pipeline;
pub mod prompt;
pub mod service;

pub use classifier::Classifier;
pub use client::{ClientConfig, OpenAiClient};
pub use generator::{parse_reply, DocGenerator, SchemaPolicy};
pub use pipeline::{DocPipeline, PipelineConfig, DEFAULT_MODEL};
pub use prompt::{strip_code_fence, PromptCatalog};
pub use service::DocService;
