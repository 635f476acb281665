use crate::root_scope::{declared_identifiers, parse_root_tokens};
use std::collections::{BTreeMap, BTreeSet};
use tint_scanner::normalize_pure;

/// Already-declared color tokens of the root scope, keyed by normalized color.
///
/// Declarations whose value references another token, or is anything other
/// than a single color literal, are left out. When several identifiers
/// declare the same color the first one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingTokenIndex {
    by_color: BTreeMap<String, String>,
}

impl ExistingTokenIndex {
    pub fn from_token_file(text: &str) -> Self {
        let mut by_color = BTreeMap::new();
        for token in parse_root_tokens(text) {
            if token.value.contains("var(--") {
                continue;
            }
            let Some(normalized) = normalize_pure(&token.value) else {
                continue;
            };
            by_color.entry(normalized).or_insert(token.identifier);
        }
        Self { by_color }
    }

    /// Identifier declared for a normalized color
    pub fn get(&self, color: &str) -> Option<&str> {
        self.by_color.get(color).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_color.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_color.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_color
            .iter()
            .map(|(color, id)| (color.as_str(), id.as_str()))
    }
}

impl FromIterator<(String, String)> for ExistingTokenIndex {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut by_color = BTreeMap::new();
        for (color, id) in iter {
            by_color.entry(color).or_insert(id);
        }
        Self { by_color }
    }
}

/// Everything a run needs to know about the target token file, read once up front
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFile {
    pub index: ExistingTokenIndex,

    /// Every identifier declared in the file, whatever its value or scope
    pub reserved: BTreeSet<String>,
}

impl TokenFile {
    pub fn parse(text: &str) -> Self {
        let index = ExistingTokenIndex::from_token_file(text);
        let mut reserved = declared_identifiers(text);
        reserved.extend(index.iter().map(|(_, id)| id.to_string()));
        log::debug!(
            "Token file: {} reusable colors, {} declared identifiers",
            index.len(),
            reserved.len()
        );
        Self { index, reserved }
    }
}
