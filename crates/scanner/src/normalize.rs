use regex::Regex;
use std::sync::OnceLock;

/// Alternatives matching one color literal: hex, functional notation, or a named color
pub(crate) const COLOR_LITERAL: &str = concat!(
    r"#(?:[0-9a-f]{8}|[0-9a-f]{6}|[0-9a-f]{4}|[0-9a-f]{3})\b",
    r"|\b(?:rgba?|hsla?)\(\s*[^()]*\)",
    r"|\b(?:white|black)\b",
);

/// Keywords that look like colors but must never be tokenized
pub const SKIP_WORDS: &[&str] = &[
    "transparent",
    "currentcolor",
    "inherit",
    "initial",
    "unset",
    "none",
];

/// Canonical form of a color literal, or `None` if it is not a color to tokenize.
///
/// Hex literals are lower-cased and short forms expanded, `white`/`black` map to
/// hex, and functional notation keeps its text with whitespace and separators
/// normalized. Channel values are never evaluated.
#[must_use]
pub fn normalize(raw: &str) -> Option<String> {
    let literal = raw.trim().to_lowercase();
    if literal.is_empty() || SKIP_WORDS.contains(&literal.as_str()) {
        return None;
    }

    match literal.as_str() {
        "white" => return Some("#ffffff".to_string()),
        "black" => return Some("#000000".to_string()),
        _ => {}
    }

    if let Some(digits) = literal.strip_prefix('#') {
        return normalize_hex(digits);
    }

    normalize_functional(&literal)
}

fn normalize_hex(digits: &str) -> Option<String> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 | 4 => {
            let mut out = String::with_capacity(1 + digits.len() * 2);
            out.push('#');
            for ch in digits.chars() {
                out.push(ch);
                out.push(ch);
            }
            Some(out)
        }
        6 | 8 => Some(format!("#{digits}")),
        _ => None,
    }
}

/// Canonical form of a value that consists of exactly one color literal.
///
/// Used for token declarations, where `1px solid #fff` or a value with two
/// literals must not count as a color.
#[must_use]
pub fn normalize_pure(value: &str) -> Option<String> {
    static PURE: OnceLock<Regex> = OnceLock::new();
    let pure = PURE.get_or_init(|| {
        Regex::new(&format!(r"(?i)^\s*(?:{COLOR_LITERAL})\s*$")).expect("static pattern")
    });
    if !pure.is_match(value) {
        return None;
    }
    normalize(value)
}

struct ArgumentPatterns {
    function: Regex,
    whitespace: Regex,
    comma: Regex,
    slash: Regex,
}

fn argument_patterns() -> &'static ArgumentPatterns {
    static PATTERNS: OnceLock<ArgumentPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| ArgumentPatterns {
        function: Regex::new(r"^(rgba?|hsla?)\(([^()]*)\)$").expect("static pattern"),
        whitespace: Regex::new(r"\s+").expect("static pattern"),
        comma: Regex::new(r"\s*,\s*").expect("static pattern"),
        slash: Regex::new(r"\s*/\s*").expect("static pattern"),
    })
}

fn normalize_functional(literal: &str) -> Option<String> {
    let patterns = argument_patterns();
    let caps = patterns.function.captures(literal)?;
    let function = caps.get(1)?.as_str();
    let inner = caps.get(2)?.as_str().trim();

    let inner = patterns.whitespace.replace_all(inner, " ");
    let inner = patterns.comma.replace_all(&inner, ", ");
    let inner = patterns.slash.replace_all(&inner, " / ");

    Some(format!("{function}({inner})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn norm(raw: &str) -> Option<String> {
        normalize(raw)
    }

    #[test]
    fn test_short_hex_expands() {
        assert_eq!(norm("#ABC").as_deref(), Some("#aabbcc"));
        assert_eq!(norm("#abcd").as_deref(), Some("#aabbccdd"));
    }

    #[test]
    fn test_long_hex_lowercases() {
        assert_eq!(norm("#aAbBcC11").as_deref(), Some("#aabbcc11"));
        assert_eq!(norm("  #FF0000 ").as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_bad_hex_rejected() {
        assert_eq!(norm("#abcde"), None);
        assert_eq!(norm("#ab"), None);
        assert_eq!(norm("#ggg"), None);
        assert_eq!(norm("#"), None);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(norm("white").as_deref(), Some("#ffffff"));
        assert_eq!(norm("BLACK").as_deref(), Some("#000000"));
        assert_eq!(norm("red"), None);
    }

    #[test]
    fn test_skip_words_rejected() {
        for word in SKIP_WORDS {
            assert_eq!(norm(word), None, "{word} should be skipped");
        }
        assert_eq!(norm("currentColor"), None);
        assert_eq!(norm(""), None);
        assert_eq!(norm("   "), None);
        assert_eq!(norm(" Transparent "), None);
    }

    #[test]
    fn test_functional_notation_whitespace_and_commas() {
        assert_eq!(
            norm("rgba( 10 , 20 , 30 , .5 )").as_deref(),
            Some("rgba(10, 20, 30, .5)")
        );
        assert_eq!(norm("RGB(1,2,3)").as_deref(), Some("rgb(1, 2, 3)"));
    }

    #[test]
    fn test_functional_notation_slash_alpha() {
        assert_eq!(
            norm("hsl(210  40%   50%/0.4)").as_deref(),
            Some("hsl(210 40% 50% / 0.4)")
        );
    }

    #[test]
    fn test_functional_notation_is_textual_only() {
        assert_ne!(norm("rgba(0, 0, 0, 0.5)"), norm("rgba(0, 0, 0, .5)"));
    }

    #[test]
    fn test_other_functions_rejected() {
        assert_eq!(norm("var(--c-raw-000)"), None);
        assert_eq!(norm("color-mix(in srgb, red, blue)"), None);
        assert_eq!(norm("rgb(1, 2, 3"), None);
        assert_eq!(norm("rgb(1, 2, 3) rgb(4, 5, 6)"), None);
    }

    #[test]
    fn test_multiline_functional_notation() {
        assert_eq!(
            norm("rgba(0,\n    0, 0, .5)").as_deref(),
            Some("rgba(0, 0, 0, .5)")
        );
    }

    #[test]
    fn test_pure_values() {
        assert_eq!(normalize_pure(" #FFF ").as_deref(), Some("#ffffff"));
        assert_eq!(
            normalize_pure("hsla(0, 0%, 0%, .2)").as_deref(),
            Some("hsla(0, 0%, 0%, .2)")
        );
        assert_eq!(normalize_pure("1px solid #fff"), None);
        assert_eq!(normalize_pure("#fff #000"), None);
        assert_eq!(normalize_pure("var(--c-base)"), None);
        assert_eq!(normalize_pure("transparent"), None);
    }
}
