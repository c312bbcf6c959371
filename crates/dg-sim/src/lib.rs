//! # dg-sim
//!
//! Deterministic stand-ins for the completion provider.
//!
//! Real providers are slow, cost money, and answer differently every time.
//! Tests use these instead:
//!
//! - [`ScriptedProvider`]: replays a fixed list of outcomes in order and
//!   records every request it received.
//! - [`SimProvider`]: answers through a responder closure, but a seeded
//!   [`ReplyFaultInjector`] turns some replies into errors, empty content,
//!   garbage, or truncated JSON. The same seed produces the same sequence.
//!
//! ## Usage
//!
//! ```rust
//! use dg_sim::{ReplyFaultConfig, SimProvider};
//!
//! let seed = dg_sim::get_or_generate_seed();
//! let provider = SimProvider::new(seed, ReplyFaultConfig::aggressive(), |_request| {
//!     "Function".to_string()
//! });
//! ```
//!
//! ## Reproducibility
//!
//! To reproduce a failing run:
//! ```bash
//! DG_SIM_SEED=12345 cargo test
//! ```

pub mod fault;
pub mod provider;

pub use fault::{ReplyFault, ReplyFaultConfig, ReplyFaultInjector, ReplyFaultStats};
pub use provider::{Scripted, ScriptedProvider, SimProvider};

/// Get the simulation seed from the environment or generate a random one.
///
/// Logs the seed for reproduction. Use `DG_SIM_SEED=<seed>` to reproduce.
/// An unparsable `DG_SIM_SEED` is ignored in favour of a random seed.
#[must_use]
pub fn get_or_generate_seed() -> u64 {
    match std::env::var("DG_SIM_SEED").ok().and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => {
            tracing::info!(seed, "DG_SIM_SEED from environment");
            seed
        }
        None => {
            let seed = rand::random::<u64>() | 1;
            tracing::info!(seed, "DG_SIM_SEED randomly generated");
            seed
        }
    }
}
