#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Unregistered handler: {0}")]
    UnregisteredHandler(String),

    #[error("Handler '{tag}' timed out after {timeout_ms}ms")]
    HandlerTimeout { tag: String, timeout_ms: u64 },

    #[error("Handler '{tag}' failed: {reason}")]
    HandlerFailure { tag: String, reason: String },

    #[error("No candidates remaining after {attempted} attempt(s); last outcome: {last}")]
    NoCandidatesRemaining { attempted: usize, last: String },

    #[error("Classification unavailable: {0}")]
    ClassificationUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RouteError>;
