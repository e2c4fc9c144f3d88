use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("LLM returned no text content")]
    EmptyResponse,

    #[error("LLM not configured: {0}")]
    NotConfigured(String),

    #[error("scripted completer has no replies left")]
    Exhausted,
}
