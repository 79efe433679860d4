/// Navigation Error Types
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Referenced stack, screen or route does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation is not allowed in the current state (e.g. removing the main stack)
    #[error("Illegal operation: {0}")]
    IllegalOperation(String),

    /// Internal bookkeeping is inconsistent
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// The resolver produced no content for a route
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// Presentation host refused or failed a presentation
    #[error("Presentation error: {0}")]
    Presentation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NavError {
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        NavError::NotFound(msg.into())
    }

    pub fn illegal<S: Into<String>>(msg: S) -> Self {
        NavError::IllegalOperation(msg.into())
    }

    pub fn invariant<S: Into<String>>(msg: S) -> Self {
        NavError::InvariantViolation(msg.into())
    }

    pub fn resolution<S: Into<String>>(msg: S) -> Self {
        NavError::Resolution(msg.into())
    }

    pub fn presentation<S: Into<String>>(msg: S) -> Self {
        NavError::Presentation(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        NavError::Config(msg.into())
    }

    pub fn stack_not_found(id: impl std::fmt::Display) -> Self {
        NavError::NotFound(format!("Stack with ID {id} not found"))
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
