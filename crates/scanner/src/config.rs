use serde::{Deserialize, Serialize};

/// Configuration for the context extractors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Presentation attributes scanned on markup elements
    pub markup_attributes: Vec<String>,

    /// Properties scanned inside inline style objects
    pub style_properties: Vec<String>,

    /// Binding name fragments that mark a color dictionary (case-insensitive)
    pub dictionary_keywords: Vec<String>,

    /// Text that marks a value as already tokenized
    pub token_reference_marker: String,
}

const MARKUP_ATTRIBUTES: &[&str] = &[
    "fill",
    "stroke",
    "stopColor",
    "color",
    "backgroundColor",
    "borderColor",
    "outlineColor",
];

const EXTRA_STYLE_PROPERTIES: &[&str] = &["boxShadow", "textShadow", "filter", "caretColor"];

impl Default for ScannerConfig {
    fn default() -> Self {
        let markup_attributes: Vec<String> =
            MARKUP_ATTRIBUTES.iter().map(|s| (*s).to_string()).collect();
        let style_properties = markup_attributes
            .iter()
            .cloned()
            .chain(EXTRA_STYLE_PROPERTIES.iter().map(|s| (*s).to_string()))
            .collect();

        Self {
            markup_attributes,
            style_properties,
            dictionary_keywords: ["color", "colors", "palette", "theme"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            token_reference_marker: "var(--".to_string(),
        }
    }
}

impl ScannerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.markup_attributes.is_empty() {
            return Err("markup_attributes must not be empty".to_string());
        }

        if self.style_properties.is_empty() {
            return Err("style_properties must not be empty".to_string());
        }

        if self.dictionary_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err("dictionary_keywords must contain a non-empty keyword".to_string());
        }

        if self.token_reference_marker.trim().is_empty() {
            return Err("token_reference_marker must not be empty".to_string());
        }

        let bad_name = self
            .markup_attributes
            .iter()
            .chain(&self.style_properties)
            .find(|name| name.is_empty() || !name.chars().all(is_name_char));
        if let Some(name) = bad_name {
            return Err(format!("invalid attribute or property name: {name:?}"));
        }

        Ok(())
    }

    /// Check whether a binding name marks a color dictionary
    #[must_use]
    pub fn is_dictionary_name(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.dictionary_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .any(|k| !k.is_empty() && lowered.contains(&k))
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}
