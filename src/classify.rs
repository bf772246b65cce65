//! Word-level classification of a quote fragment against its aligned
//! window.
//!
//! The edit script between the fragment's normalized tokens and the window
//! decides the fate of every word token; whitespace and punctuation always
//! pass through untagged and never count as errors. Acceptance rules:
//!
//! - An equal run is a genuine match when the quote is "short" (at most one
//!   word token), when the run carries at least [`MIN_EQ_RUN`] word tokens,
//!   or when it touches either end of the fragment. A lone equal word with
//!   differing material on both sides is treated as coincidence and flagged.
//! - In a replace/delete run every word token is flagged, except the
//!   fragment's final token, which gets a second chance: nearby window
//!   positions are probed for *loose* equality (normalized, trailing
//!   non-word characters stripped), so a trailing punctuation difference
//!   at the quote's last word is not a misquote.
//! - When the window score falls below the similarity floor the edit
//!   script is skipped entirely and every word token is flagged.
//!
//! The error count is returned as a value and folded upstream; nothing
//! here mutates shared state.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;
use crate::similarity::{opcodes, OpTag};
use crate::token::{is_word_char, Token};

/// Minimum word-token count for an interior equal run to be accepted.
pub const MIN_EQ_RUN: usize = 2;

/// Default window-score floor below which a fragment is flagged wholesale.
pub const DEFAULT_SIMILARITY_FLOOR: f64 = 0.5;

/// How far around the expected position the final-token loose probe looks.
const LOOSE_MATCH_REACH: isize = 2;

/// Per-token outcome. Only word tokens are ever `Matched` or `Unmatched`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenVerdict {
    Matched,
    Unmatched,
    Passthrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// An accepted match, rendered as one highlighted phrase.
    Phrase,
    /// A word token flagged as a misquote.
    Flagged,
    /// Verbatim filler: whitespace, punctuation, unchecked text.
    Plain,
}

/// A render unit covering a contiguous token range of the fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub kind: SegmentKind,
    /// Raw text of the covered tokens, concatenated.
    pub text: String,
    pub token_start: usize,
    pub token_end: usize,
}

/// Outcome of classifying one fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedFragment {
    /// One verdict per fragment token, in order.
    pub verdicts: Vec<TokenVerdict>,
    /// Ordered render segments; their texts concatenate to the fragment.
    pub segments: Vec<Segment>,
    /// Unmatched word tokens in this fragment.
    pub error_count: usize,
}

fn flagged(token: &Token, idx: usize) -> Segment {
    Segment {
        kind: SegmentKind::Flagged,
        text: token.text.clone(),
        token_start: idx,
        token_end: idx + 1,
    }
}

fn plain(token: &Token, idx: usize) -> Segment {
    Segment {
        kind: SegmentKind::Plain,
        text: token.text.clone(),
        token_start: idx,
        token_end: idx + 1,
    }
}

/// Classify a fragment's tokens against its aligned window.
///
/// `raw` and `norm` run in parallel; `window` is the slice of body tokens
/// chosen by the aligner and `score` its similarity ratio.
pub fn classify_fragment(
    raw: &[Token],
    norm: &[String],
    window: &[String],
    score: f64,
    similarity_floor: Option<f64>,
    min_equal_run: usize,
) -> ClassifiedFragment {
    debug_assert_eq!(raw.len(), norm.len());

    let total_words = raw.iter().filter(|t| t.is_word()).count();
    let short_quote = total_words <= 1;

    let mut verdicts = vec![TokenVerdict::Passthrough; raw.len()];
    let mut segments = Vec::new();
    let mut error_count = 0;

    if let Some(floor) = similarity_floor {
        if score < floor {
            // No plausible window; don't trust any token-level agreement.
            for (idx, token) in raw.iter().enumerate() {
                if token.is_word() {
                    verdicts[idx] = TokenVerdict::Unmatched;
                    error_count += 1;
                    segments.push(flagged(token, idx));
                } else {
                    segments.push(plain(token, idx));
                }
            }
            return ClassifiedFragment {
                verdicts,
                segments,
                error_count,
            };
        }
    }

    for op in opcodes(norm, window) {
        match op.tag {
            OpTag::Equal => {
                let run = &raw[op.a_start..op.a_end];
                let run_words = run.iter().filter(|t| t.is_word()).count();
                let at_edge = op.a_start == 0 || op.a_end == raw.len();
                if short_quote || run_words >= min_equal_run || at_edge {
                    let mut text = String::new();
                    for (k, token) in run.iter().enumerate() {
                        if token.is_word() {
                            verdicts[op.a_start + k] = TokenVerdict::Matched;
                        }
                        text.push_str(&token.text);
                    }
                    segments.push(Segment {
                        kind: SegmentKind::Phrase,
                        text,
                        token_start: op.a_start,
                        token_end: op.a_end,
                    });
                } else {
                    for (k, token) in run.iter().enumerate() {
                        let idx = op.a_start + k;
                        if token.is_word() {
                            verdicts[idx] = TokenVerdict::Unmatched;
                            error_count += 1;
                            segments.push(flagged(token, idx));
                        } else {
                            segments.push(plain(token, idx));
                        }
                    }
                }
            }
            OpTag::Replace | OpTag::Delete => {
                for (k, token) in raw[op.a_start..op.a_end].iter().enumerate() {
                    let idx = op.a_start + k;
                    if !token.is_word() {
                        segments.push(plain(token, idx));
                        continue;
                    }
                    let is_final = idx == raw.len() - 1;
                    if is_final && loose_match_near(token, window, op.b_end) {
                        verdicts[idx] = TokenVerdict::Matched;
                        segments.push(Segment {
                            kind: SegmentKind::Phrase,
                            text: token.text.clone(),
                            token_start: idx,
                            token_end: idx + 1,
                        });
                    } else {
                        verdicts[idx] = TokenVerdict::Unmatched;
                        error_count += 1;
                        segments.push(flagged(token, idx));
                    }
                }
            }
            OpTag::Insert => {}
        }
    }

    ClassifiedFragment {
        verdicts,
        segments,
        error_count,
    }
}

/// Untagged fragment used when the source has no sentences to check
/// against: every token passes through and nothing counts as an error.
pub fn passthrough_fragment(raw: &[Token]) -> ClassifiedFragment {
    ClassifiedFragment {
        verdicts: vec![TokenVerdict::Passthrough; raw.len()],
        segments: raw
            .iter()
            .enumerate()
            .map(|(idx, token)| plain(token, idx))
            .collect(),
        error_count: 0,
    }
}

/// Probe window positions around `b_end - 1` for a loose match.
fn loose_match_near(token: &Token, window: &[String], b_end: usize) -> bool {
    for off in -LOOSE_MATCH_REACH..=LOOSE_MATCH_REACH {
        let idx = b_end as isize - 1 + off;
        if idx < 0 || idx as usize >= window.len() {
            continue;
        }
        if loose_equal(&token.text, &window[idx as usize]) {
            return true;
        }
    }
    false
}

/// Equality after normalization and stripping trailing non-word
/// characters from both sides.
pub(crate) fn loose_equal(a: &str, b: &str) -> bool {
    clean_token(a) == clean_token(b)
}

fn clean_token(t: &str) -> String {
    normalize(t)
        .trim_end_matches(|c: char| !is_word_char(c))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_equal_ignores_trailing_punctuation() {
        assert!(loose_equal("Remarkable,", "remarkable"));
        assert!(loose_equal("mat.\u{201D}", "mat"));
        assert!(!loose_equal("dog", "cat"));
        assert!(!loose_equal("bye2", "bye"));
    }
}
