use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open byte range `[start, end)` into a file's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check whether two spans share at least one byte
    #[must_use]
    pub const fn intersects(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Where a literal was found. Only used for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ContextTag {
    /// `property: value;` in a style module
    StyleDeclaration(String),
    /// Presentation attribute on a markup element
    MarkupAttribute(String),
    /// Quoted property value inside an inline style object
    InlineStyle(String),
    /// Quoted value inside a color-named dictionary binding
    Dictionary(String),
}

impl ContextTag {
    /// Property, attribute or binding name this tag refers to
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::StyleDeclaration(name)
            | Self::MarkupAttribute(name)
            | Self::InlineStyle(name)
            | Self::Dictionary(name) => name,
        }
    }

    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::StyleDeclaration(_) => "css",
            Self::MarkupAttribute(_) => "tsx-jsx-attr",
            Self::InlineStyle(_) => "tsx-style-prop",
            Self::Dictionary(_) => "tsx-color-dict",
        }
    }
}

impl fmt::Display for ContextTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix(), self.name())
    }
}

/// One located, normalizable color literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Project-relative path of the file it was found in
    pub file_path: String,

    /// Byte span of the literal in the file
    pub span: Span,

    /// Literal exactly as written in the source
    pub raw: String,

    /// Canonical color used as the deduplication key
    pub normalized: String,

    /// Syntactic context the literal belongs to
    pub context: ContextTag,

    /// Start line (1-indexed)
    pub line: usize,

    /// Start column in characters (1-indexed)
    pub column: usize,
}

/// Newline positions of a text, for turning offsets into line/column pairs
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    newlines: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let newlines = text
            .bytes()
            .enumerate()
            .filter_map(|(idx, b)| (b == b'\n').then_some(idx))
            .collect();
        Self { text, newlines }
    }

    /// 1-based `(line, column)` of a byte offset
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let line = self.newlines.partition_point(|&nl| nl < offset) + 1;
        let line_start = if line > 1 {
            self.newlines[line - 2] + 1
        } else {
            0
        };
        let column = self
            .text
            .get(line_start..offset)
            .map_or(offset.saturating_sub(line_start), |prefix| prefix.chars().count())
            + 1;
        (line, column)
    }
}
