//! Tokenization into word, whitespace, and punctuation tokens.
//!
//! The tokenizer uses longest-match-first rules: maximal runs of word
//! characters, maximal runs of whitespace, a literal `...` as a single
//! punctuation token, and otherwise one punctuation token per grapheme
//! cluster.
//!
//! Round-trip fidelity is a hard invariant: concatenating the `text` of all
//! tokens, in order, reproduces the input exactly. Nothing is dropped,
//! substituted, or reordered.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Classification of a token's character content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenTag {
    /// Run of word characters (alphanumeric or underscore).
    Word,
    /// Run of whitespace.
    Space,
    /// A single punctuation grapheme, or a literal `...`.
    Punc,
}

/// A single token with its byte position in the input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Exact slice of the input text.
    pub text: String,
    pub tag: TokenTag,
    /// Byte offset where the token starts.
    pub start: usize,
}

impl Token {
    pub fn is_word(&self) -> bool {
        self.tag == TokenTag::Word
    }
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn classify_grapheme(g: &str) -> TokenTag {
    match g.chars().next() {
        Some(c) if is_word_char(c) => TokenTag::Word,
        Some(c) if c.is_whitespace() && g.chars().all(char::is_whitespace) => TokenTag::Space,
        _ => TokenTag::Punc,
    }
}

/// Split `text` into an ordered token sequence.
pub fn tokenize(text: &str) -> Vec<Token> {
    let graphemes: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < graphemes.len() {
        let (start, g) = graphemes[i];
        let tag = classify_grapheme(g);
        match tag {
            TokenTag::Word | TokenTag::Space => {
                let mut end = i + 1;
                while end < graphemes.len() && classify_grapheme(graphemes[end].1) == tag {
                    end += 1;
                }
                let end_byte = graphemes.get(end).map(|(b, _)| *b).unwrap_or(text.len());
                tokens.push(Token {
                    text: text[start..end_byte].to_string(),
                    tag,
                    start,
                });
                i = end;
            }
            TokenTag::Punc => {
                // A literal three-period ellipsis is one token, not three.
                let is_ellipsis = g == "."
                    && matches!(graphemes.get(i + 1), Some((_, ".")))
                    && matches!(graphemes.get(i + 2), Some((_, ".")));
                if is_ellipsis {
                    tokens.push(Token {
                        text: "...".to_string(),
                        tag: TokenTag::Punc,
                        start,
                    });
                    i += 3;
                } else {
                    tokens.push(Token {
                        text: g.to_string(),
                        tag: TokenTag::Punc,
                        start,
                    });
                    i += 1;
                }
            }
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(text: &str) {
        let rebuilt: String = tokenize(text).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, text, "tokenizer must reproduce input exactly");
    }

    #[test]
    fn round_trip_fidelity() {
        round_trip("");
        round_trip("The cat sat on the mat.");
        round_trip("  leading and trailing  ");
        round_trip("\u{201C}Curly\u{201D} quotes, don\u{2019}t touch\u{2026}");
        round_trip("Wait... what?!");
        round_trip("non\u{00A0}breaking");
        round_trip("emoji 🦀 and words");
    }

    #[test]
    fn splits_into_word_space_punc() {
        let tokens = tokenize("The cat sat.");
        let tags: Vec<TokenTag> = tokens.iter().map(|t| t.tag).collect();
        assert_eq!(
            tags,
            vec![
                TokenTag::Word,
                TokenTag::Space,
                TokenTag::Word,
                TokenTag::Space,
                TokenTag::Word,
                TokenTag::Punc,
            ]
        );
    }

    #[test]
    fn ellipsis_is_one_token() {
        let tokens = tokenize("Wait... go");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Wait", "...", " ", "go"]);
        assert_eq!(tokens[1].tag, TokenTag::Punc);
    }

    #[test]
    fn two_periods_stay_separate() {
        let tokens = tokenize("a..b");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", ".", ".", "b"]);
    }

    #[test]
    fn byte_positions_map_back() {
        let text = "He said \u{201C}hi\u{201D}.";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.start + token.text.len()], token.text);
        }
    }

    #[test]
    fn underscore_and_digits_are_word_chars() {
        let tokens = tokenize("var_1 = 2");
        assert!(tokens[0].is_word());
        assert_eq!(tokens[0].text, "var_1");
        assert!(tokens[4].is_word());
    }

    #[test]
    fn whitespace_runs_are_maximal() {
        let tokens = tokenize("a \t\n b");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].text, " \t\n ");
        assert_eq!(tokens[1].tag, TokenTag::Space);
    }
}
