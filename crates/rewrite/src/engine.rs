use crate::error::{Result, RewriteError};
use std::collections::BTreeMap;
use tint_scanner::{Occurrence, Span};
use tint_tokens::TokenNaming;

/// Text to put in place of one span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub span: Span,
    pub text: String,
}

impl Replacement {
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }
}

/// Apply replacements left to right, copying untouched text verbatim.
///
/// Replacements are ordered by span first. One that starts before the end of
/// the previous one, or that does not fall on character boundaries inside
/// `text`, is skipped.
#[must_use]
pub fn apply_replacements(text: &str, replacements: &[Replacement]) -> String {
    let mut ordered: Vec<&Replacement> = replacements.iter().collect();
    ordered.sort_by_key(|r| r.span);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for replacement in ordered {
        let Span { start, end } = replacement.span;
        if start < cursor || end < start || text.get(start..end).is_none() {
            log::debug!("Skipping replacement at {start}..{end} (cursor {cursor})");
            continue;
        }
        out.push_str(&text[cursor..start]);
        out.push_str(&replacement.text);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Replace every occurrence with a reference to its color's token
pub fn rewrite(
    text: &str,
    occurrences: &[Occurrence],
    mapping: &BTreeMap<String, String>,
    naming: &TokenNaming,
) -> Result<String> {
    let replacements = occurrences
        .iter()
        .map(|occ| {
            let token = mapping
                .get(&occ.normalized)
                .ok_or_else(|| RewriteError::MissingToken {
                    color: occ.normalized.clone(),
                })?;
            Ok(Replacement::new(occ.span, naming.reference(token)))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(apply_replacements(text, &replacements))
}
