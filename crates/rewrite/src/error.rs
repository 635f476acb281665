use thiserror::Error;
use tint_scanner::ScannerError;
use tint_tokens::TokenError;

pub type Result<T> = std::result::Result<T, RewriteError>;

#[derive(Error, Debug)]
pub enum RewriteError {
    /// An occurrence's color has no token in the mapping
    #[error("No token assigned to color {color}")]
    MissingToken { color: String },

    /// The same path was scanned more than once
    #[error("Duplicate input path {path}")]
    DuplicatePath { path: String },

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Scanner error: {0}")]
    Scanner(#[from] ScannerError),
}
