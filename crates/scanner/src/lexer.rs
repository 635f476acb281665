//! Brace, string and comment tracking over raw source text.
//!
//! All delimiters are ASCII, so the scan walks bytes. Every offset returned
//! lands on a delimiter or right after one and is therefore a char boundary.

/// Lexical state of the scan. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    LineComment,
    BlockComment,
    Quoted(u8),
}

/// Find the brace that closes the one at `open`.
///
/// Skips braces inside single, double and backtick strings and inside `//` and
/// `/* */` comments. Returns `None` when `text[open]` is not `{`, when the
/// block is unbalanced, or when the text ends before the block closes.
#[must_use]
pub fn match_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth: isize = 0;
    let mut mode = Mode::Code;
    let mut i = open;

    while i < bytes.len() {
        let ch = bytes[i];
        let next = bytes.get(i + 1).copied();

        match mode {
            Mode::LineComment => {
                if ch == b'\n' {
                    mode = Mode::Code;
                }
                i += 1;
            }
            Mode::BlockComment => {
                if ch == b'*' && next == Some(b'/') {
                    mode = Mode::Code;
                    i += 2;
                } else {
                    i += 1;
                }
            }
            Mode::Quoted(quote) => {
                if ch == b'\\' && next.is_some() {
                    i += 2;
                    continue;
                }
                if ch == quote {
                    mode = Mode::Code;
                }
                i += 1;
            }
            Mode::Code => match (ch, next) {
                (b'/', Some(b'/')) => {
                    mode = Mode::LineComment;
                    i += 2;
                }
                (b'/', Some(b'*')) => {
                    mode = Mode::BlockComment;
                    i += 2;
                }
                (b'\'' | b'"' | b'`', _) => {
                    mode = Mode::Quoted(ch);
                    i += 1;
                }
                (b'{', _) => {
                    depth += 1;
                    i += 1;
                }
                (b'}', _) => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                    if depth < 0 {
                        return None;
                    }
                    i += 1;
                }
                _ => i += 1,
            },
        }
    }

    None
}

/// Iterate the contents of every single or double quoted string in `[start, end)`.
///
/// Yields `(value_start, value_end)`, the offsets strictly between the quotes.
/// Backtick strings are consumed but never yielded since they may interpolate.
/// Comments are skipped and an unterminated string yields nothing.
#[must_use]
pub fn quoted_string_spans(text: &str, start: usize, end: usize) -> QuotedSpans<'_> {
    let end = end.min(text.len());
    QuotedSpans {
        bytes: text.as_bytes(),
        pos: start.min(end),
        end,
    }
}

/// Lazy sequence produced by [`quoted_string_spans`]
#[derive(Debug, Clone)]
pub struct QuotedSpans<'a> {
    bytes: &'a [u8],
    pos: usize,
    end: usize,
}

impl QuotedSpans<'_> {
    fn peek(&self, at: usize) -> Option<u8> {
        if at < self.end {
            Some(self.bytes[at])
        } else {
            None
        }
    }

    /// Consume a string body whose opening quote sits just before `pos`.
    /// Returns the offset of the closing quote, if any.
    fn consume_string(&mut self, quote: u8) -> Option<usize> {
        while self.pos < self.end {
            let ch = self.bytes[self.pos];
            if ch == b'\\' && self.pos + 1 < self.end {
                self.pos += 2;
                continue;
            }
            if ch == quote {
                let close = self.pos;
                self.pos += 1;
                return Some(close);
            }
            self.pos += 1;
        }
        None
    }
}

impl Iterator for QuotedSpans<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let mut mode = Mode::Code;

        while self.pos < self.end {
            let ch = self.bytes[self.pos];
            let next = self.peek(self.pos + 1);

            match mode {
                Mode::LineComment => {
                    if ch == b'\n' {
                        mode = Mode::Code;
                    }
                    self.pos += 1;
                }
                Mode::BlockComment => {
                    if ch == b'*' && next == Some(b'/') {
                        mode = Mode::Code;
                        self.pos += 2;
                    } else {
                        self.pos += 1;
                    }
                }
                // Strings are consumed inline, so only comment states carry over.
                _ => match (ch, next) {
                    (b'/', Some(b'/')) => {
                        mode = Mode::LineComment;
                        self.pos += 2;
                    }
                    (b'/', Some(b'*')) => {
                        mode = Mode::BlockComment;
                        self.pos += 2;
                    }
                    (b'\'' | b'"', _) => {
                        self.pos += 1;
                        let value_start = self.pos;
                        if let Some(close) = self.consume_string(ch) {
                            return Some((value_start, close));
                        }
                    }
                    (b'`', _) => {
                        self.pos += 1;
                        self.consume_string(b'`');
                    }
                    _ => self.pos += 1,
                },
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn spans(text: &str) -> Vec<&str> {
        quoted_string_spans(text, 0, text.len())
            .map(|(s, e)| &text[s..e])
            .collect()
    }

    #[test]
    fn test_match_simple_block() {
        let text = "const a = { b: 1 };";
        assert_eq!(match_brace(text, 10), Some(17));
    }

    #[test]
    fn test_match_nested_blocks() {
        let text = "{ a: { b: { c: 1 } } }";
        assert_eq!(match_brace(text, 0), Some(text.len() - 1));
        assert_eq!(match_brace(text, 5), Some(19));
    }

    #[test]
    fn test_requires_open_brace() {
        assert_eq!(match_brace("abc", 0), None);
        assert_eq!(match_brace("{}", 1), None);
        assert_eq!(match_brace("{}", 10), None);
    }

    #[test]
    fn test_braces_in_strings_and_comments_are_ignored() {
        let text = r#"{ a: "}", b: '{', c: `}${x}`, // }
 /* } */ d: 1 }"#;
        assert_eq!(match_brace(text, 0), Some(text.len() - 1));
    }

    #[test]
    fn test_escaped_quote_does_not_terminate_string() {
        let text = r#"{ a: "\"}" }"#;
        assert_eq!(match_brace(text, 0), Some(text.len() - 1));
    }

    #[test]
    fn test_unclosed_block_is_not_found() {
        assert_eq!(match_brace("{ a: { b: 1 }", 0), None);
        assert_eq!(match_brace("{ a: \"}", 0), None);
        assert_eq!(match_brace("{ /* } ", 0), None);
    }

    #[test]
    fn test_quoted_spans_yield_inner_content() {
        assert_eq!(spans(r##"a: "#fff", b: 'red'"##), vec!["#fff", "red"]);
    }

    #[test]
    fn test_quoted_spans_skip_backticks_and_comments() {
        let text = "a: `#fff`, // 'no'\n b: /* \"no\" */ 'yes'";
        assert_eq!(spans(text), vec!["yes"]);
    }

    #[test]
    fn test_quoted_spans_escape_aware() {
        let text = r#"a: "x\"y", b: 'z'"#;
        assert_eq!(spans(text), vec![r#"x\"y"#, "z"]);
    }

    #[test]
    fn test_quoted_spans_respect_bounds() {
        let text = r#""a" "b" "c""#;
        let found: Vec<_> = quoted_string_spans(text, 4, 7).collect();
        assert_eq!(found, vec![(5, 6)]);
        assert_eq!(quoted_string_spans(text, 9, 3).count(), 0);
    }

    #[test]
    fn test_quoted_spans_unterminated_yields_nothing() {
        assert_eq!(spans(r#"a: "never closed"#), Vec::<&str>::new());
    }

    #[test]
    fn test_quoted_spans_restartable() {
        let text = r#"{ a: "1", b: "2" }"#;
        let first: Vec<_> = quoted_string_spans(text, 0, text.len()).collect();
        let second: Vec<_> = quoted_string_spans(text, 0, text.len()).collect();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn proptest_match_brace_never_panics(text in "[{}'\"`/*\\\\a\n ]{0,64}", open in 0usize..64) {
            if let Some(close) = match_brace(&text, open) {
                prop_assert!(close > open);
                prop_assert_eq!(text.as_bytes()[close], b'}');
            }
        }

        #[test]
        fn proptest_quoted_spans_are_ordered_and_in_bounds(text in "[{}'\"`/*\\\\a\n ]{0,64}") {
            let mut last_end = 0;
            for (start, end) in quoted_string_spans(&text, 0, text.len()) {
                prop_assert!(start >= last_end);
                prop_assert!(start <= end);
                prop_assert!(end <= text.len());
                last_end = end;
            }
        }
    }
}
