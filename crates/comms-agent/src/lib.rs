//! LLM driver for communications planning.
//!
//! Wraps the Anthropic Messages API behind a small [`Completer`] trait so the
//! planner can swap in an offline backend (no API key) or a scripted one
//! (tests) without changing call sites.
//!
//! # Architecture
//!
//! ```text
//! RunConfig { system_prompt, prompt }
//!     │
//!     ▼
//! dyn Completer   ← AnthropicClient | Offline | testing::ScriptedCompleter
//!     │
//!     ▼
//! RunResult       ← joined text blocks + timing
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use comms_agent::{AnthropicClient, ClientOptions, Completer};
//!
//! let client = AnthropicClient::new(ClientOptions {
//!     api_key: std::env::var("ANTHROPIC_API_KEY")?,
//!     ..Default::default()
//! })?;
//! let text = client.complete("You are terse.", "Say hello.").await?;
//! ```

pub mod client;
pub mod error;
pub mod runner;
pub mod testing;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::AnthropicClient;
pub use error::AgentError;
pub use runner::{run as agent_run, Completer, Offline, RunConfig, RunResult};
pub use types::{ChatMessage, ClientOptions, ContentBlock, MessagesRequest, MessagesResponse};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, AgentError>;
