use thiserror::Error;

/// Custom error types for reelmix
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("Command execution failed: {0}")]
    CommandExecution(String),

    #[error("Required external tool not found: {0}")]
    DependencyNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("URL list error: {0}")]
    UrlList(String),

    #[error("No video files found")]
    NoFilesFound,

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Result type for reelmix operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
