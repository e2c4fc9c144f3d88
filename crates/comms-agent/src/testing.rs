//! Test doubles for code that depends on a [`Completer`].

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{AgentError, Completer, Result};

/// Replies from a fixed queue, one entry per call, and records every prompt
/// it was given. An `Err` entry simulates a backend failure.
#[derive(Default)]
pub struct ScriptedCompleter {
    replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompleter {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a failing reply.
    pub fn push_error(&self, message: impl Into<String>) {
        if let Ok(mut q) = self.replies.lock() {
            q.push_back(Err(message.into()));
        }
    }

    /// Queue a successful reply.
    pub fn push_reply(&self, reply: impl Into<String>) {
        if let Ok(mut q) = self.replies.lock() {
            q.push_back(Ok(reply.into()));
        }
    }

    /// Every prompt received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Completer for ScriptedCompleter {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, _system: &str, prompt: &str) -> Result<String> {
        if let Ok(mut p) = self.prompts.lock() {
            p.push(prompt.to_string());
        }
        let next = self
            .replies
            .lock()
            .ok()
            .and_then(|mut q| q.pop_front())
            .ok_or(AgentError::Exhausted)?;
        next.map_err(|body| AgentError::Api { status: 500, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_in_order_then_exhausts() {
        let s = ScriptedCompleter::new(["one", "two"]);
        assert_eq!(s.complete("", "a").await.unwrap(), "one");
        assert_eq!(s.complete("", "b").await.unwrap(), "two");
        assert!(matches!(s.complete("", "c").await, Err(AgentError::Exhausted)));
        assert_eq!(s.prompts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn queued_error_is_returned() {
        let s = ScriptedCompleter::default();
        s.push_error("boom");
        s.push_reply("ok");
        assert!(matches!(s.complete("", "x").await, Err(AgentError::Api { .. })));
        assert_eq!(s.complete("", "y").await.unwrap(), "ok");
    }
}
