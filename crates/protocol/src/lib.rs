use serde::{Deserialize, Serialize};
use tint_tokens::TokenSource;

pub mod path_filters;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// What was scanned
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReportScope {
    pub root: String,
    pub suffixes: Vec<String>,
    pub excluded: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub mode: String,
    pub scope: ReportScope,
    pub files_scanned: usize,
    pub matches: usize,
    pub unique_colors: usize,
    pub reused_tokens: usize,
    pub new_tokens: usize,
}

/// One distinct color and the token it maps to
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MappingRow {
    pub normalized: String,
    pub token: String,
    pub source: TokenSource,
    pub occurrences: usize,
}

/// One literal in one file
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OccurrenceRow {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub raw: String,
    pub normalized: String,
    pub context: String,
    pub token: String,
    pub source: TokenSource,
}

/// Machine-readable color map written next to the Markdown report
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ColorMap {
    pub meta: ReportMeta,

    /// In assignment order: descending frequency, then color text
    pub mappings: Vec<MappingRow>,

    /// Sorted by file, line, column
    pub occurrences: Vec<OccurrenceRow>,
}

impl ColorMap {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}
