//! Quoted-span extraction from the draft text.
//!
//! A single left-to-right scan finds non-overlapping double-quoted spans in
//! either glyph style: `“…”` or straight `"…"`. Within one quote the close
//! is the *nearest* matching glyph (non-greedy), and the interior must be
//! non-empty.
//!
//! Unterminated or glyph-mismatched quotes produce no match at all: the
//! scan simply moves on to the next character. The engine only verifies
//! properly delimited quotations; anything else is silently skipped.

use serde::{Deserialize, Serialize};

/// A properly delimited quote in the draft, with byte offsets covering the
/// delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSpan {
    /// Byte offset of the opening glyph.
    pub start: usize,
    /// Byte offset one past the closing glyph.
    pub end: usize,
    pub open: char,
    pub close: char,
    /// Interior text, delimiters excluded.
    pub content: String,
}

fn closing_glyph(open: char) -> Option<char> {
    match open {
        '\u{201C}' => Some('\u{201D}'),
        '"' => Some('"'),
        _ => None,
    }
}

/// Scan `text` for quoted spans, in order, non-overlapping.
pub fn extract_quotes(text: &str) -> Vec<QuoteSpan> {
    let mut quotes = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let c = match text[pos..].chars().next() {
            Some(c) => c,
            None => break,
        };
        if let Some(close) = closing_glyph(c) {
            let content_start = pos + c.len_utf8();
            if let Some(rel) = text[content_start..].find(close) {
                if rel > 0 {
                    let close_pos = content_start + rel;
                    let end = close_pos + close.len_utf8();
                    quotes.push(QuoteSpan {
                        start: pos,
                        end,
                        open: c,
                        close,
                        content: text[content_start..close_pos].to_string(),
                    });
                    pos = end;
                    continue;
                }
            }
        }
        pos += c.len_utf8();
    }
    quotes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_quote_with_offsets() {
        let text = "He said \"hello there\" loudly.";
        let quotes = extract_quotes(text);
        assert_eq!(quotes.len(), 1);
        let q = &quotes[0];
        assert_eq!(q.content, "hello there");
        assert_eq!(&text[q.start..q.end], "\"hello there\"");
        assert_eq!((q.open, q.close), ('"', '"'));
    }

    #[test]
    fn curly_quote() {
        let quotes = extract_quotes("She wrote \u{201C}good morning\u{201D} today.");
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].content, "good morning");
        assert_eq!(quotes[0].open, '\u{201C}');
    }

    #[test]
    fn multiple_quotes_in_order() {
        let quotes = extract_quotes("\"one\" and \"two\"");
        let contents: Vec<&str> = quotes.iter().map(|q| q.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two"]);
    }

    #[test]
    fn mixed_styles() {
        let quotes = extract_quotes("\u{201C}a\u{201D} and \"b\"");
        assert_eq!(quotes.len(), 2);
    }

    #[test]
    fn unterminated_quote_is_skipped() {
        assert!(extract_quotes("An \"unfinished quote").is_empty());
        assert!(extract_quotes("A \u{201C}dangling curly").is_empty());
    }

    #[test]
    fn mismatched_delimiters_are_skipped() {
        // Curly open never pairs with a straight close.
        assert!(extract_quotes("A \u{201C}curly start\" here").is_empty());
    }

    #[test]
    fn empty_interior_is_not_a_quote() {
        assert!(extract_quotes("empty \"\" pair").is_empty());
        // But the second delimiter can still open a later quote.
        let quotes = extract_quotes("\"\"x\"");
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].content, "x");
    }

    #[test]
    fn straight_quote_after_dangling_curly() {
        let quotes = extract_quotes("\u{201C}abandoned and \"rescued\"");
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].content, "rescued");
    }
}
