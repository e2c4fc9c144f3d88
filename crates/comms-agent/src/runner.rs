use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use crate::{AgentError, Result};

// ─── Completer ────────────────────────────────────────────────────────────

/// A text-in, text-out LLM backend.
///
/// Implemented by [`crate::AnthropicClient`], [`Offline`] and the scripted
/// test double in [`crate::testing`]. Callers hold it as
/// `Arc<dyn Completer>` so the backend can be chosen at startup.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &str;

    /// Run one completion with the given system prompt and user prompt.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

// ─── Offline ──────────────────────────────────────────────────────────────

/// Backend used when no LLM is configured. Every call fails with
/// [`AgentError::NotConfigured`], which sends callers down their
/// deterministic fallback path.
#[derive(Debug, Clone)]
pub struct Offline {
    reason: String,
}

impl Offline {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Completer for Offline {
    fn name(&self) -> &str {
        "offline"
    }

    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String> {
        Err(AgentError::NotConfigured(self.reason.clone()))
    }
}

// ─── RunConfig ────────────────────────────────────────────────────────────

/// A single completion request.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub system_prompt: String,
    pub prompt: String,
}

// ─── RunResult ────────────────────────────────────────────────────────────

/// The text produced by a completed run, plus timing.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub backend: String,
    pub result_text: String,
    pub elapsed: Duration,
}

/// Drive a single completion to its result.
pub async fn run(completer: &dyn Completer, config: RunConfig) -> Result<RunResult> {
    let started = Instant::now();
    debug!(
        backend = completer.name(),
        system_len = config.system_prompt.len(),
        prompt_len = config.prompt.len(),
        "starting completion"
    );
    let result_text = completer
        .complete(&config.system_prompt, &config.prompt)
        .await?;
    Ok(RunResult {
        backend: completer.name().to_string(),
        result_text,
        elapsed: started.elapsed(),
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────
