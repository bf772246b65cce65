//! Text canonicalization.
//!
//! Source and draft texts routinely disagree on punctuation glyphs: word
//! processors substitute curly quotes and real ellipsis characters, and
//! copy-paste introduces non-breaking spaces. Two folding functions handle
//! this:
//!
//! - [`normalize`] folds glyphs *and* lowercases, for comparison.
//! - [`unify_punctuation`] folds glyphs only, for text a user will see
//!   (original casing must remain visible).
//!
//! Both are pure, total functions with no failure mode.

/// Glyph variants folded to their plain ASCII equivalents.
const GLYPH_FOLDS: &[(char, &str)] = &[
    ('\u{201C}', "\""), // “
    ('\u{201D}', "\""), // ”
    ('\u{2018}', "'"),  // ‘
    ('\u{2019}', "'"),  // ’
    ('\u{2026}', "..."),
    ('\u{00A0}', " "),
];

/// Fold curly quotes, apostrophes, ellipses, and non-breaking spaces to
/// their plain equivalents, preserving case.
pub fn unify_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    'chars: for c in text.chars() {
        for (from, to) in GLYPH_FOLDS {
            if c == *from {
                out.push_str(to);
                continue 'chars;
            }
        }
        out.push(c);
    }
    out
}

/// Canonical form for comparison: glyph folding plus lowercasing.
pub fn normalize(text: &str) -> String {
    unify_punctuation(text).to_lowercase()
}
