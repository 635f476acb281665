//! # Tint Rewrite
//!
//! Turns scanned color literals into token references.
//!
//! ## Phases
//!
//! ```text
//! SourceFile[] ──scan (per file, any order)──> ScannedFile[]
//!                                                  │
//!                             barrier: ordered by path
//!                                                  │
//!                      assign (global) ──> Assignment ──verify
//!                                                  │
//!              rewrite (per file) ──> ChangedFile { original, rewritten }
//! ```
//!
//! Rewriting is purely offset-based. Text outside a replaced span is copied
//! byte for byte, and a file only counts as changed when its text differs.
//!
//! ## Example
//!
//! ```rust
//! use tint_rewrite::{Codemod, SourceFile};
//! use tint_scanner::ScannerConfig;
//! use tint_tokens::TokenNaming;
//!
//! let codemod = Codemod::new(&ScannerConfig::default(), TokenNaming::default()).unwrap();
//! let outcome = codemod
//!     .run(
//!         vec![SourceFile::new("a.module.css", ".a { color: #ff0000; } .b { color: #FF0000; }")],
//!         ":root {}",
//!     )
//!     .unwrap();
//!
//! assert_eq!(
//!     outcome.changed["a.module.css"].rewritten,
//!     ".a { color: var(--c-raw-000); } .b { color: var(--c-raw-000); }"
//! );
//! ```

mod engine;
mod error;
mod patch;
mod pipeline;

pub use engine::{apply_replacements, rewrite, Replacement};
pub use error::{Result, RewriteError};
pub use patch::{render_patch, NO_CHANGES};
pub use pipeline::{ChangedFile, Codemod, RunOutcome, ScannedFile, SourceFile};
