use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommsError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("planned communication not found: {0}")]
    PlannedCommNotFound(String),

    #[error("invalid project status: {0}")]
    InvalidStatus(String),

    #[error("invalid audience: {0}")]
    InvalidAudience(String),

    #[error("invalid communication type: {0}")]
    InvalidCommType(String),

    #[error("invalid communication status: {0}")]
    InvalidCommStatus(String),

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("template error: {0}")]
    Template(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CommsError>;
