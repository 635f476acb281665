use thiserror::Error;

pub type Result<T> = std::result::Result<T, TokenError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// A minted identifier clashes with a declared one or with another minted one
    #[error("Token identifier collision: {identifier}")]
    IdentifierCollision { identifier: String },

    /// A color marked as generated has no minted declaration
    #[error("Generated color {color} has no minted identifier")]
    MissingDeclaration { color: String },

    #[error("Invalid token naming: {0}")]
    InvalidNaming(String),

    #[error("Failed to render palette: {0}")]
    Palette(String),
}
