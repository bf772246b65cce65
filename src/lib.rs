//! Verification of quoted material in a draft against a source document.
//!
//! Given a source text and a draft that quotes it, the pipeline finds every
//! properly delimited quotation in the draft, aligns it word-by-word
//! against the source, and reports which quoted words are faithful and
//! which are misquotes. Stages:
//!
//! 1. index the source into sentences ([`SentenceIndex`]),
//! 2. extract quoted spans from the draft ([`extract_quotes`]),
//! 3. split each quote into sentence-sized fragments,
//! 4. slide each fragment over the source token stream to find its best
//!    window ([`best_window`]),
//! 5. classify every word via the edit script against that window
//!    ([`classify_fragment`]),
//! 6. assemble annotated draft and source views plus the aggregate report.
//!
//! [`QuoteChecker`] drives the whole thing:
//!
//! ```
//! use quotecheck::{CheckStatus, QuoteChecker};
//!
//! let source = "The cat sat on the mat. It purred softly.";
//! let draft = "She wrote \u{201C}The cat sat on the mat.\u{201D} earlier.";
//! let report = QuoteChecker::new().check(source, draft);
//! assert_eq!(report.status, CheckStatus::Correct);
//! ```

mod align;
mod annotate;
mod checker;
mod classify;
mod display;
mod normalize;
mod quote_extract;
mod sentence_index;
mod sentence_map;
mod similarity;
mod token;

pub use align::{best_window, WindowMatch};
pub use annotate::{AnnotatedDraft, AnnotatedSource, DraftNode, SourceLine, SourceNode};
pub use checker::{
    CheckConfig, CheckReport, CheckStatus, FragmentCheck, QuoteCheck, QuoteChecker,
};
pub use classify::{
    classify_fragment, ClassifiedFragment, Segment, SegmentKind, TokenVerdict,
    DEFAULT_SIMILARITY_FLOOR, MIN_EQ_RUN,
};
pub use display::FragmentDisplay;
pub use normalize::{normalize, unify_punctuation};
pub use quote_extract::{extract_quotes, QuoteSpan};
pub use sentence_index::{IndexOptions, IndexedLine, LinePart, Sentence, SentenceIndex};
pub use sentence_map::map_to_sentence;
pub use similarity::{char_ratio, matching_blocks, opcodes, ratio, MatchBlock, OpTag, Opcode};
pub use token::{tokenize, Token, TokenTag};

#[cfg(test)]
mod tests {
    mod classify;
    mod pipeline;
    mod sentence_index;
    mod sentence_map;
}
