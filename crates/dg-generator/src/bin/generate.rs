//! CLI for generating documentation for a code snippet.
//!
//! # Usage
//!
//! ```bash
//! # Detect the kind and document in English
//! cargo run -p dg-generator --bin dg-generate -- src/button.tsx
//!
//! # Document a known function in Romanian
//! cargo run -p dg-generator --bin dg-generate -- --kind function --language ro src/add.js
//!
//! # Read the snippet from stdin
//! cat src/add.js | cargo run -p dg-generator --bin dg-generate -- -
//! ```
//!
//! The response envelope is printed to stdout; logs go to stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use dg_core::{ProviderError, TargetLanguage};
use dg_generator::client::API_KEY_VAR;
use dg_generator::{DocService, PipelineConfig, SchemaPolicy, DEFAULT_MODEL};
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Generate structured documentation for a function or UI component.
#[derive(Debug, Parser)]
#[command(name = "dg-generate", version)]
struct Args {
    /// Source file to document (`-` reads stdin)
    source: PathBuf,

    /// Language of the generated documentation (en, ro)
    #[arg(short, long, default_value = "en")]
    language: TargetLanguage,

    /// What the snippet is; `auto` asks the model first
    #[arg(short, long, value_enum, default_value_t = KindArg::Auto)]
    kind: KindArg,

    /// Model identifier sent to the provider
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Reject replies missing the documentation keys
    #[arg(long)]
    require_keys: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Auto,
    Function,
    Component,
}

/// Startup errors.
#[derive(Debug, thiserror::Error)]
enum BootstrapError {
    #[error("Provider setup failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Failed to read source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source is empty")]
    EmptySource,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; the variables may come from the environment
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(e, BootstrapError::Provider(ProviderError::MissingApiKey(_))) {
                eprintln!();
                eprintln!("Make sure {} is set:", API_KEY_VAR);
                eprintln!("  export {}=sk-...", API_KEY_VAR);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<String, BootstrapError> {
    let schema_policy = if args.require_keys {
        SchemaPolicy::RequireKeys
    } else {
        SchemaPolicy::PassThrough
    };
    let config = PipelineConfig {
        model: args.model,
        auto_detect: args.kind == KindArg::Auto,
        schema_policy,
    };

    // The key is checked before any work is done
    let service = DocService::from_env(config)?;

    let source = read_source(&args.source).await?;
    if source.trim().is_empty() {
        return Err(BootstrapError::EmptySource);
    }

    tracing::info!(
        source = %args.source.display(),
        language = %args.language,
        kind = ?args.kind,
        "Generating documentation"
    );

    let json = match args.kind {
        KindArg::Auto => service.generate_doc(args.language, &source).await,
        KindArg::Function => service.function_doc(args.language, &source).await,
        KindArg::Component => service.component_doc(args.language, &source).await,
    };
    Ok(json)
}

async fn read_source(path: &Path) -> Result<String, std::io::Error> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        tokio::io::stdin().read_to_string(&mut source).await?;
        Ok(source)
    } else {
        tokio::fs::read_to_string(path).await
    }
}
