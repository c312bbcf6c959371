//! Simulated completion providers.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use dg_core::{CompletionProvider, CompletionRequest, ProviderError};

use crate::fault::{ReplyFault, ReplyFaultConfig, ReplyFaultInjector, ReplyFaultStats};

/// Replacement text for [`ReplyFault::Garbage`].
const GARBAGE_REPLY: &str = "Sure! Here is the documentation you asked for.";

/// One scripted provider outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scripted {
    /// Answer with this text
    Reply(String),
    /// Answer without content
    Empty,
    /// Fail the call
    Fail,
}

impl Scripted {
    pub fn reply(text: impl Into<String>) -> Self {
        Scripted::Reply(text.into())
    }

    fn resolve(&self) -> Result<Option<String>, ProviderError> {
        match self {
            Scripted::Reply(text) => Ok(Some(text.clone())),
            Scripted::Empty => Ok(None),
            Scripted::Fail => Err(ProviderError::Http("scripted failure".to_string())),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Provider that replays scripted outcomes in order.
///
/// Once the script runs out, the fallback outcome (if any) is repeated;
/// without a fallback, further calls fail. Every request is recorded.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Scripted>>,
    fallback: Option<Scripted>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    /// Create a provider that replays `script` once.
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider that gives the same outcome on every call.
    pub fn always(outcome: Scripted) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(outcome),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Shorthand for a script of plain text replies.
    pub fn replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(replies.into_iter().map(|r| Scripted::Reply(r.into())))
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn calls_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Copy of every request received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        lock(&self.requests).push(request.clone());

        let next = lock(&self.script).pop_front();
        match next.as_ref().or(self.fallback.as_ref()) {
            Some(outcome) => outcome.resolve(),
            None => Err(ProviderError::InvalidResponse("script exhausted".to_string())),
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

type Responder = Box<dyn Fn(&CompletionRequest) -> String + Send + Sync>;

/// Provider that answers through a responder, with seeded fault injection.
///
/// The responder produces the "well-behaved" reply for a request; the
/// injector then decides whether to corrupt it.
pub struct SimProvider {
    responder: Responder,
    injector: Mutex<ReplyFaultInjector>,
}

impl SimProvider {
    /// Create a new simulated provider.
    pub fn new<F>(seed: u64, config: ReplyFaultConfig, responder: F) -> Self
    where
        F: Fn(&CompletionRequest) -> String + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            injector: Mutex::new(ReplyFaultInjector::new(seed, config)),
        }
    }

    /// Get statistics about injected faults.
    #[must_use]
    pub fn stats(&self) -> ReplyFaultStats {
        lock(&self.injector).stats()
    }
}

#[async_trait]
impl CompletionProvider for SimProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        let fault = lock(&self.injector).next_fault();
        let reply = (self.responder)(request);

        match fault {
            None => Ok(Some(reply)),
            Some(ReplyFault::Error) => Err(ProviderError::Api {
                status: 503,
                message: "simulated outage".to_string(),
            }),
            Some(ReplyFault::Empty) => Ok(None),
            Some(ReplyFault::Garbage) => Ok(Some(GARBAGE_REPLY.to_string())),
            Some(ReplyFault::Truncate) => {
                let cut = reply
                    .char_indices()
                    .nth(reply.chars().count() / 2)
                    .map_or(0, |(i, _)| i);
                Ok(Some(reply[..cut].to_string()))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "sim"
    }
}
