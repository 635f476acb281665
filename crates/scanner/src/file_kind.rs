use std::path::Path;

/// Kind of source file, which decides the extractors that run on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Style sheet module (`*.module.css`, `*.css`)
    StyleModule,
    /// Markup component (`*.tsx`, `*.jsx`)
    Component,
    Unknown,
}

impl FileKind {
    /// Detect file kind from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "css" => FileKind::StyleModule,
            "tsx" | "jsx" => FileKind::Component,
            _ => FileKind::Unknown,
        }
    }

    /// Detect file kind from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileKind::Unknown)
    }

    /// Get kind name as string
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::StyleModule => "style-module",
            FileKind::Component => "component",
            FileKind::Unknown => "unknown",
        }
    }
}
