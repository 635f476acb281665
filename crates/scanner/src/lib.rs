//! # Tint Scanner
//!
//! Finds hardcoded color literals in style modules and UI components.
//!
//! ## Philosophy
//!
//! The scanner is a restricted single-pass tracker, not a parser. It only needs to:
//! - Tell real code apart from quoted strings and comments
//! - Match nested braces so a color dictionary can be bounded
//! - Attribute every literal to the property, attribute or binding it belongs to
//!
//! A literal that cannot be attributed to one of those contexts is never reported,
//! because it could not be rewritten safely.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     │
//!     ├──> File Kind (from suffix)
//!     │
//!     ├──> Context Extractors
//!     │    ├─> Style declarations      (style modules)
//!     │    ├─> Markup attributes       (components)
//!     │    ├─> Inline style objects    (components)
//!     │    └─> Color dictionaries      (components, bounded by the lexer)
//!     │
//!     ├──> Normalizer (canonical color form, skip-set)
//!     │
//!     └──> Occurrence[] (deduplicated by span, sorted, line/column annotated)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tint_scanner::{Extractor, FileKind, ScannerConfig};
//!
//! let extractor = Extractor::new(&ScannerConfig::default()).unwrap();
//! let text = ".a { color: #FF0000; }";
//!
//! let occurrences = extractor.scan("button.module.css", text, FileKind::StyleModule);
//! assert_eq!(occurrences.len(), 1);
//! assert_eq!(occurrences[0].normalized, "#ff0000");
//! ```

mod config;
mod error;
mod extract;
mod file_kind;
mod lexer;
mod normalize;
mod types;

pub use config::ScannerConfig;
pub use error::{Result, ScannerError};
pub use extract::Extractor;
pub use file_kind::FileKind;
pub use lexer::{match_brace, quoted_string_spans, QuotedSpans};
pub use normalize::{normalize, normalize_pure, SKIP_WORDS};
pub use types::{ContextTag, LineIndex, Occurrence, Span};
