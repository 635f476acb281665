use crate::error::{Result, TokenError};
use serde::{Deserialize, Serialize};

/// How minted tokens are named and referenced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenNaming {
    /// Identifier prefix; the numeric suffix is appended to it
    pub prefix: String,

    /// Zero-padding width of the numeric suffix
    pub width: usize,

    /// Prefix stripped from identifiers to key the companion palette
    pub palette_strip_prefix: String,
}

impl Default for TokenNaming {
    fn default() -> Self {
        Self {
            prefix: "--c-raw-".to_string(),
            width: 3,
            palette_strip_prefix: "--c-".to_string(),
        }
    }
}

impl TokenNaming {
    pub fn validate(&self) -> Result<()> {
        if !self.prefix.starts_with("--") {
            return Err(TokenError::InvalidNaming(format!(
                "prefix {:?} must start with `--`",
                self.prefix
            )));
        }
        if self.prefix.len() == 2 {
            return Err(TokenError::InvalidNaming(
                "prefix must name something after `--`".to_string(),
            ));
        }
        if self.width == 0 {
            return Err(TokenError::InvalidNaming("width must be > 0".to_string()));
        }
        Ok(())
    }

    /// Identifier for a numeric suffix, e.g. `--c-raw-007`
    #[must_use]
    pub fn identifier(&self, index: usize) -> String {
        format!("{}{:0width$}", self.prefix, index, width = self.width)
    }

    /// Text that replaces a literal at its use site
    #[must_use]
    pub fn reference(&self, identifier: &str) -> String {
        format!("var({identifier})")
    }

    /// Palette key for an identifier: the identifier with the strip prefix removed
    #[must_use]
    pub fn palette_key<'a>(&self, identifier: &'a str) -> &'a str {
        identifier
            .strip_prefix(self.palette_strip_prefix.as_str())
            .unwrap_or(identifier)
    }
}
