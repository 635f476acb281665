//! Reading custom-property declarations out of a token file.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tint_scanner::match_brace;

/// One `--identifier: value` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootToken {
    pub identifier: String,
    pub value: String,
}

fn root_selector() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r":root\b").expect("static pattern"))
}

fn declaration() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // The last declaration of a block may omit its `;`
        Regex::new(r"(?P<prop>--[a-zA-Z0-9-]+)\s*:\s*(?P<value>[^;{}]+)(?:;|\}|\z)")
            .expect("static pattern")
    })
}

fn property_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?P<prop>--[a-zA-Z0-9-]+)\s*:").expect("static pattern"))
}

/// Offsets of the opening and closing brace of the first `:root` block
#[must_use]
pub fn find_root_block(text: &str) -> Option<(usize, usize)> {
    let selector = root_selector().find(text)?;
    let open = selector.end() + text[selector.end()..].find('{')?;
    let close = match_brace(text, open)?;
    Some((open, close))
}

/// Declarations of the root scope in source order.
/// A missing or unbalanced root block yields no declarations.
#[must_use]
pub fn parse_root_tokens(text: &str) -> Vec<RootToken> {
    let Some((open, close)) = find_root_block(text) else {
        log::debug!("No :root block in token file");
        return Vec::new();
    };
    parse_declarations(&text[open + 1..close])
}

/// Every custom property declared anywhere in the file
#[must_use]
pub fn declared_identifiers(text: &str) -> BTreeSet<String> {
    property_name()
        .captures_iter(text)
        .filter_map(|caps| Some(caps.name("prop")?.as_str().to_string()))
        .collect()
}

fn parse_declarations(block: &str) -> Vec<RootToken> {
    declaration()
        .captures_iter(block)
        .filter_map(|caps| {
            Some(RootToken {
                identifier: caps.name("prop")?.as_str().trim().to_string(),
                value: caps.name("value")?.as_str().trim().to_string(),
            })
        })
        .collect()
}
