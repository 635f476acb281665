//! # Tint Tokens
//!
//! Maps normalized colors to design-token identifiers.
//!
//! ## Flow
//!
//! ```text
//! Token file text ──> root scope ──> ExistingTokenIndex (color -> identifier)
//!                 └─> every declaration ──> reserved identifiers
//!
//! Occurrences + index + reserved ──> assign() ──> Assignment
//!                                                   ├─> color -> identifier
//!                                                   ├─> existing | generated
//!                                                   └─> minted identifier -> color
//! ```
//!
//! Minted identifiers follow [`TokenNaming`]: a fixed prefix plus a zero-padded
//! counter starting at 0 that skips every reserved identifier. The counter
//! advances over colors ranked by descending frequency, then by color text, so
//! the same occurrences always produce the same identifiers.
//!
//! ## Example
//!
//! ```rust
//! use tint_scanner::{Extractor, FileKind, ScannerConfig};
//! use tint_tokens::{assign, TokenFile, TokenNaming};
//!
//! let extractor = Extractor::new(&ScannerConfig::default()).unwrap();
//! let occurrences = extractor.scan(
//!     "a.module.css",
//!     ".a { color: #FFF; } .b { color: #123; }",
//!     FileKind::StyleModule,
//! );
//!
//! let token_file = TokenFile::parse(":root { --c-bg: #ffffff; }");
//! let assignment = assign(
//!     &occurrences,
//!     &token_file.index,
//!     &token_file.reserved,
//!     &TokenNaming::default(),
//! );
//! assert_eq!(assignment.token_for("#ffffff"), Some("--c-bg"));
//! assert_eq!(assignment.token_for("#112233"), Some("--c-raw-000"));
//! ```

mod assign;
mod declarations;
mod error;
mod index;
mod naming;
mod root_scope;

pub use assign::{assign, Assignment, TokenSource};
pub use declarations::{insert_into_root, render_generated_file, render_palette};
pub use error::{Result, TokenError};
pub use index::{ExistingTokenIndex, TokenFile};
pub use naming::TokenNaming;
pub use root_scope::{declared_identifiers, find_root_block, parse_root_tokens, RootToken};
