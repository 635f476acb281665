use crate::config::ScannerConfig;
use crate::error::{Result, ScannerError};
use crate::file_kind::FileKind;
use crate::lexer::{match_brace, quoted_string_spans};
use crate::normalize::{normalize, COLOR_LITERAL};
use crate::types::{ContextTag, LineIndex, Occurrence, Span};
use regex::Regex;
use std::collections::BTreeMap;

const STYLE_DECLARATION: &str = r"(?P<prop>(?:--)?[a-zA-Z0-9-]+)\s*:\s*(?P<value>[^;{}]+);";

const DICTIONARY_BINDING: &str =
    r"(?m)\b(?:const|let|var)\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)\b[^=;]*=\s*\{";

/// Locates color literals in the syntactic contexts that can be rewritten safely
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ScannerConfig,
    color: Regex,
    declaration: Regex,
    attribute: Regex,
    style_property: Regex,
    binding: Regex,
}

impl Extractor {
    /// Build an extractor, compiling the allow-lists into patterns
    pub fn new(config: &ScannerConfig) -> Result<Self> {
        config.validate().map_err(ScannerError::invalid_config)?;

        let attribute = Regex::new(&format!(
            r#"\b(?P<prop>{})\s*=\s*(?:"(?P<dq>[^"']*)"|'(?P<sq>[^"']*)')"#,
            alternation(&config.markup_attributes)
        ))?;
        let style_property = Regex::new(&format!(
            r#"\b(?P<prop>{})\s*:\s*(?:"(?P<dq>[^"']*)"|'(?P<sq>[^"']*)')"#,
            alternation(&config.style_properties)
        ))?;

        Ok(Self {
            config: config.clone(),
            color: Regex::new(&format!("(?i){COLOR_LITERAL}"))?,
            declaration: Regex::new(STYLE_DECLARATION)?,
            attribute,
            style_property,
            binding: Regex::new(DICTIONARY_BINDING)?,
        })
    }

    /// Scan one file and return its occurrences.
    ///
    /// Spans are unique and non-overlapping; when two extractors claim the same
    /// span the first one wins. The result is sorted by span and carries
    /// 1-based line/column positions.
    pub fn scan(&self, file_path: &str, text: &str, kind: FileKind) -> Vec<Occurrence> {
        let raw = match kind {
            FileKind::StyleModule => self.style_declarations(file_path, text),
            FileKind::Component => {
                let mut hits = self.markup_attributes(file_path, text);
                hits.extend(self.inline_styles(file_path, text));
                hits.extend(self.dictionaries(file_path, text));
                hits
            }
            FileKind::Unknown => {
                log::debug!("No extractors for {file_path}");
                Vec::new()
            }
        };

        let mut claimed: BTreeMap<Span, Occurrence> = BTreeMap::new();
        for occ in raw {
            claimed.entry(occ.span).or_insert(occ);
        }

        let mut occurrences: Vec<Occurrence> = Vec::with_capacity(claimed.len());
        for occ in claimed.into_values() {
            if let Some(prev) = occurrences.last() {
                if prev.span.intersects(&occ.span) {
                    log::debug!(
                        "Dropping overlapping literal {:?} at {}..{} in {file_path}",
                        occ.raw,
                        occ.span.start,
                        occ.span.end
                    );
                    continue;
                }
            }
            occurrences.push(occ);
        }

        let lines = LineIndex::new(text);
        for occ in &mut occurrences {
            let (line, column) = lines.position(occ.span.start);
            occ.line = line;
            occ.column = column;
        }

        log::debug!("{file_path}: {} color literals", occurrences.len());
        occurrences
    }

    /// `property: value;` declarations in a style module
    fn style_declarations(&self, file_path: &str, text: &str) -> Vec<Occurrence> {
        let mut hits = Vec::new();
        for caps in self.declaration.captures_iter(text) {
            let (Some(prop), Some(value)) = (caps.name("prop"), caps.name("value")) else {
                continue;
            };
            let context = ContextTag::StyleDeclaration(prop.as_str().trim().to_string());
            self.extract_segment(
                text,
                Span::new(value.start(), value.end()),
                file_path,
                &context,
                &mut hits,
            );
        }
        hits
    }

    /// Quoted values of allow-listed presentation attributes
    fn markup_attributes(&self, file_path: &str, text: &str) -> Vec<Occurrence> {
        let mut hits = Vec::new();
        for caps in self.attribute.captures_iter(text) {
            let (Some(prop), Some(value)) = (caps.name("prop"), quoted_value(&caps)) else {
                continue;
            };
            let context = ContextTag::MarkupAttribute(prop.as_str().to_string());
            self.extract_segment(text, value, file_path, &context, &mut hits);
        }
        hits
    }

    /// Quoted property values inside object-literal style objects
    fn inline_styles(&self, file_path: &str, text: &str) -> Vec<Occurrence> {
        let mut hits = Vec::new();
        for caps in self.style_property.captures_iter(text) {
            let (Some(prop), Some(value)) = (caps.name("prop"), quoted_value(&caps)) else {
                continue;
            };
            let context = ContextTag::InlineStyle(prop.as_str().to_string());
            self.extract_segment(text, value, file_path, &context, &mut hits);
        }
        hits
    }

    /// Every quoted string inside a color-named object binding
    fn dictionaries(&self, file_path: &str, text: &str) -> Vec<Occurrence> {
        let mut hits = Vec::new();
        for caps in self.binding.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.name("name")) else {
                continue;
            };
            let name = name.as_str();
            if !self.config.is_dictionary_name(name) {
                continue;
            }

            let open = whole.end() - 1;
            let Some(close) = match_brace(text, open) else {
                log::debug!("Unbalanced dictionary `{name}` in {file_path}, skipping");
                continue;
            };

            let context = ContextTag::Dictionary(name.to_string());
            for (start, end) in quoted_string_spans(text, open + 1, close) {
                self.extract_segment(text, Span::new(start, end), file_path, &context, &mut hits);
            }
        }
        hits
    }

    /// Collect normalizable literals from one bounded segment.
    /// A segment that already references a token yields nothing.
    fn extract_segment(
        &self,
        text: &str,
        segment: Span,
        file_path: &str,
        context: &ContextTag,
        out: &mut Vec<Occurrence>,
    ) {
        let Some(slice) = text.get(segment.start..segment.end) else {
            return;
        };
        if slice.contains(self.config.token_reference_marker.as_str()) {
            return;
        }

        for m in self.color.find_iter(slice) {
            let raw = m.as_str();
            let Some(normalized) = normalize(raw) else {
                continue;
            };
            out.push(Occurrence {
                file_path: file_path.to_string(),
                span: Span::new(segment.start + m.start(), segment.start + m.end()),
                raw: raw.to_string(),
                normalized,
                context: context.clone(),
                line: 0,
                column: 0,
            });
        }
    }
}

fn alternation(names: &[String]) -> String {
    names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|")
}

fn quoted_value(caps: &regex::Captures<'_>) -> Option<Span> {
    caps.name("dq")
        .or_else(|| caps.name("sq"))
        .map(|m| Span::new(m.start(), m.end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extractor() -> Extractor {
        Extractor::new(&ScannerConfig::default()).unwrap()
    }

    fn raws(occurrences: &[Occurrence]) -> Vec<&str> {
        occurrences.iter().map(|o| o.raw.as_str()).collect()
    }

    #[test]
    fn test_style_declarations() {
        let text = ".a { color: #FF0000; border: 1px solid rgba(0,0,0,.1); }";
        let occ = extractor().scan("a.module.css", text, FileKind::StyleModule);
        assert_eq!(raws(&occ), vec!["#FF0000", "rgba(0,0,0,.1)"]);
        assert_eq!(occ[0].context.to_string(), "css:color");
        assert_eq!(occ[1].normalized, "rgba(0, 0, 0, .1)");
        assert_eq!(&text[occ[0].span.start..occ[0].span.end], "#FF0000");
    }

    #[test]
    fn test_custom_property_declarations() {
        let text = ":root { --accent: #0af; }";
        let occ = extractor().scan("a.module.css", text, FileKind::StyleModule);
        assert_eq!(occ.len(), 1);
        assert_eq!(occ[0].context.to_string(), "css:--accent");
        assert_eq!(occ[0].normalized, "#00aaff");
    }

    #[test]
    fn test_tokenized_declaration_is_skipped_wholesale() {
        let text = ".a { border: 1px solid var(--c-line) #fff; color: #000; }";
        let occ = extractor().scan("a.module.css", text, FileKind::StyleModule);
        assert_eq!(raws(&occ), vec!["#000"]);
    }

    #[test]
    fn test_skip_words_and_unknown_names_ignored() {
        let text = ".a { color: transparent; background: red; fill: currentColor; }";
        let occ = extractor().scan("a.module.css", text, FileKind::StyleModule);
        assert!(occ.is_empty());
    }

    #[test]
    fn test_markup_attributes() {
        let text = r##"<svg><path fill="#123" stroke='white' d="M0 0" /></svg>"##;
        let occ = extractor().scan("Icon.tsx", text, FileKind::Component);
        assert_eq!(raws(&occ), vec!["#123", "white"]);
        assert_eq!(occ[0].context.to_string(), "tsx-jsx-attr:fill");
        assert_eq!(occ[1].normalized, "#ffffff");
    }

    #[test]
    fn test_markup_attribute_not_in_allow_list() {
        let text = r##"<div title="#123" strokeWidth="2" />"##;
        let occ = extractor().scan("A.tsx", text, FileKind::Component);
        assert!(occ.is_empty());
    }

    #[test]
    fn test_inline_style_objects() {
        let text = r#"<div style={{ boxShadow: "0 1px 2px rgba(0, 0, 0, 0.2)", caretColor: '#abc' }} />"#;
        let occ = extractor().scan("A.tsx", text, FileKind::Component);
        assert_eq!(raws(&occ), vec!["rgba(0, 0, 0, 0.2)", "#abc"]);
        assert_eq!(occ[0].context.to_string(), "tsx-style-prop:boxShadow");
    }

    #[test]
    fn test_dictionary_values() {
        let text = r##"
const chartPalette = {
  primary: "#3366FF",
  // muted: "#999999",
  nested: { danger: 'rgb(200, 0, 0)' },
  label: `#${hex}`,
  name: "not a color",
};
const layout = { gap: "#111111" };
"##;
        let occ = extractor().scan("Chart.tsx", text, FileKind::Component);
        assert_eq!(raws(&occ), vec!["#3366FF", "rgb(200, 0, 0)"]);
        assert!(occ
            .iter()
            .all(|o| o.context.to_string() == "tsx-color-dict:chartPalette"));
        assert_eq!(occ[0].line, 3);
        assert_eq!(occ[0].column, 13);
    }

    #[test]
    fn test_unbalanced_dictionary_is_skipped() {
        let text = r##"const colors = { a: "#fff", "#;"##;
        let occ = extractor().scan("A.tsx", text, FileKind::Component);
        assert!(occ.is_empty());
    }

    #[test]
    fn test_shared_span_claimed_once() {
        let text = r##"const theme = { color: "#ff0000" };"##;
        let occ = extractor().scan("A.tsx", text, FileKind::Component);
        assert_eq!(occ.len(), 1);
        assert_eq!(occ[0].context.to_string(), "tsx-style-prop:color");
    }

    #[test]
    fn test_tokenized_attribute_is_skipped() {
        let text = r#"<rect fill="var(--c-raw-000)" />"#;
        let occ = extractor().scan("A.tsx", text, FileKind::Component);
        assert!(occ.is_empty());
    }

    #[test]
    fn test_component_extractors_do_not_run_on_styles() {
        let text = r##"<rect fill="#fff" />"##;
        let occ = extractor().scan("a.module.css", text, FileKind::StyleModule);
        assert!(occ.is_empty());
        assert!(extractor()
            .scan("notes.md", ".a { color: #fff; }", FileKind::Unknown)
            .is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScannerConfig {
            markup_attributes: Vec::new(),
            ..ScannerConfig::default()
        };
        assert!(matches!(
            Extractor::new(&config),
            Err(ScannerError::InvalidConfig(_))
        ));
    }
}
