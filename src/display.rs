//! Terminal rendering of a checked fragment.
//!
//! The fragment's tokens are laid out on one line with padding between
//! them, and each verified or flagged segment gets its own marker line
//! underneath, aligned by display width:
//!
//! ```text
//! The  dog  sat
//! ╰─╯ matched
//!      ╰─╯ misquote
//! ```

use std::fmt;

use unicode_width::UnicodeWidthStr;

use crate::checker::FragmentCheck;
use crate::classify::SegmentKind;

const SPACE_PADDING: usize = 2;

/// Adapter rendering a [`FragmentCheck`] with underline markers.
pub struct FragmentDisplay<'a> {
    fragment: &'a FragmentCheck,
}

impl<'a> FragmentDisplay<'a> {
    pub fn new(fragment: &'a FragmentCheck) -> Self {
        Self { fragment }
    }
}

impl fmt::Display for FragmentDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut starts = Vec::with_capacity(self.fragment.tokens.len());
        let mut ends = Vec::with_capacity(self.fragment.tokens.len());
        let mut line = String::new();
        let mut cursor = 0;
        for (i, token) in self.fragment.tokens.iter().enumerate() {
            if i > 0 {
                for _ in 0..SPACE_PADDING {
                    line.push(' ');
                }
                cursor += SPACE_PADDING;
            }
            starts.push(cursor);
            line.push_str(&token.text);
            cursor += UnicodeWidthStr::width(token.text.as_str());
            ends.push(cursor);
        }
        write!(f, "{}", line)?;

        for segment in &self.fragment.segments {
            let label = match segment.kind {
                SegmentKind::Phrase => "matched",
                SegmentKind::Flagged => "misquote",
                SegmentKind::Plain => continue,
            };
            if segment.token_end == 0 || segment.token_end > ends.len() {
                continue;
            }
            let start = starts[segment.token_start];
            let end = ends[segment.token_end - 1];
            writeln!(f)?;
            for _ in 0..start {
                write!(f, " ")?;
            }
            write!(f, "\u{2570}")?;
            for _ in (start + 1)..end.saturating_sub(1) {
                write!(f, "\u{2500}")?;
            }
            if end > start + 1 {
                write!(f, "\u{256F}")?;
            }
            write!(f, " {}", label)?;
        }
        Ok(())
    }
}
