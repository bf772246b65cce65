//! Window alignment of a quote fragment against the source body.
//!
//! For a fragment of `n` normalized tokens, every contiguous window of `n`
//! source tokens is scored with the Ratcliff/Obershelp ratio and the
//! strictly best offset is kept (first-seen wins ties). When the source is
//! shorter than the fragment the single candidate window is the whole body.

use serde::{Deserialize, Serialize};

use crate::similarity::ratio;

/// Best-scoring window of source tokens for one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowMatch {
    /// Offset into the body token stream.
    pub start: usize,
    /// Window length; equals the fragment's token count unless the body is
    /// shorter than the fragment.
    pub len: usize,
    /// Similarity ratio of the window against the fragment.
    pub score: f64,
}

/// Slide a fragment-sized window over `body` and return the best match.
pub fn best_window(fragment: &[String], body: &[String]) -> WindowMatch {
    let n = fragment.len();
    let last_start = body.len().saturating_sub(n);
    let mut best = WindowMatch {
        start: 0,
        len: n.min(body.len()),
        score: ratio(fragment, &body[0..n.min(body.len())]),
    };
    for start in 1..=last_start {
        let end = start + n;
        let score = ratio(fragment, &body[start..end]);
        if score > best.score {
            best = WindowMatch {
                start,
                len: end - start,
                score,
            };
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn finds_exact_window() {
        let body = toks("the cat sat on the mat");
        let fragment = toks("sat on");
        let m = best_window(&fragment, &body);
        assert_eq!(m.start, 2);
        assert_eq!(m.len, 2);
        assert!((m.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn first_seen_wins_ties() {
        let body = toks("echo x echo");
        let fragment = toks("echo");
        let m = best_window(&fragment, &body);
        assert_eq!(m.start, 0);
    }

    #[test]
    fn no_overlap_defaults_to_first_window() {
        let body = toks("alpha beta");
        let fragment = toks("gamma");
        let m = best_window(&fragment, &body);
        assert_eq!(m.start, 0);
        assert_eq!(m.score, 0.0);
    }

    #[test]
    fn body_shorter_than_fragment() {
        let body = toks("just two");
        let fragment = toks("one two three four");
        let m = best_window(&fragment, &body);
        assert_eq!(m.start, 0);
        assert_eq!(m.len, 2);
    }

    #[test]
    fn empty_body_scores_zero() {
        let body: Vec<String> = Vec::new();
        let fragment = toks("anything");
        let m = best_window(&fragment, &body);
        assert_eq!(m.start, 0);
        assert_eq!(m.len, 0);
        assert_eq!(m.score, 0.0);
    }
}
