use thiserror::Error;

/// Result type for scanner operations
pub type Result<T> = std::result::Result<T, ScannerError>;

/// Errors that can occur while building a scanner
#[derive(Error, Debug)]
pub enum ScannerError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A pattern derived from the configuration failed to compile
    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),
}

impl ScannerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
