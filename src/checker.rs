//! The top-level verification pipeline.
//!
//! [`QuoteChecker::check`] ties the stages together: index the source into
//! sentences, extract quoted spans from the draft, split each quote into
//! sentence fragments, align every fragment against the body token stream,
//! classify its words, and assemble the annotated draft and source views
//! plus the aggregate report.
//!
//! The pipeline is total: any pair of input strings, including empty ones,
//! produces a report. A draft with quotes but an empty source yields an
//! untagged passthrough report rather than an error.

use serde::{Deserialize, Serialize};

use crate::align::{best_window, WindowMatch};
use crate::annotate::{AnnotatedDraft, AnnotatedSource};
use crate::classify::{
    classify_fragment, passthrough_fragment, Segment, SegmentKind, TokenVerdict,
    DEFAULT_SIMILARITY_FLOOR, MIN_EQ_RUN,
};
use crate::normalize::normalize;
use crate::quote_extract::{extract_quotes, QuoteSpan};
use crate::sentence_index::{split_sentences, IndexOptions, SentenceIndex};
use crate::sentence_map::map_to_sentence;
use crate::token::{tokenize, Token};

/// Tunable checking behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    /// Window-score floor below which a fragment is flagged wholesale.
    /// `None` disables the bail-out entirely.
    pub similarity_floor: Option<f64>,
    /// Minimum word count for an interior equal run to count as matched.
    pub min_equal_run: usize,
    /// Join source lines broken mid-sentence before indexing.
    pub merge_line_breaks: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            similarity_floor: Some(DEFAULT_SIMILARITY_FLOOR),
            min_equal_run: MIN_EQ_RUN,
            merge_line_breaks: true,
        }
    }
}

impl CheckConfig {
    pub fn with_similarity_floor(mut self, floor: f64) -> Self {
        self.similarity_floor = Some(floor);
        self
    }

    pub fn without_similarity_floor(mut self) -> Self {
        self.similarity_floor = None;
        self
    }

    pub fn with_min_equal_run(mut self, min: usize) -> Self {
        self.min_equal_run = min;
        self
    }

    /// Index each physical source line on its own.
    pub fn keep_line_breaks(mut self) -> Self {
        self.merge_line_breaks = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckStatus {
    Correct,
    MisquotesPresent,
}

/// One sentence-sized piece of a quote, with everything learned about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentCheck {
    /// The fragment text as written in the draft.
    pub text: String,
    /// Whitespace between this fragment and the next, preserved verbatim.
    pub trailing_gap: String,
    pub tokens: Vec<Token>,
    /// Best body window, absent when the source had no sentences.
    pub window: Option<WindowMatch>,
    /// Source sentence the fragment was attributed to.
    pub sentence_id: Option<usize>,
    pub verdicts: Vec<TokenVerdict>,
    pub segments: Vec<Segment>,
    pub error_count: usize,
}

/// A checked quote: its span in the draft and its fragments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCheck {
    pub span: QuoteSpan,
    pub fragments: Vec<FragmentCheck>,
    pub error_count: usize,
}

/// Everything `check` produces for one source/draft pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub status: CheckStatus,
    /// Total unmatched words across all quotes.
    pub error_count: usize,
    pub quotes: Vec<QuoteCheck>,
    pub draft: AnnotatedDraft,
    pub source: AnnotatedSource,
}

impl CheckReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Verifies quoted material in a draft against a source document.
#[derive(Debug, Clone, Default)]
pub struct QuoteChecker {
    config: CheckConfig,
}

impl QuoteChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CheckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Run the full pipeline over one source/draft pair.
    pub fn check(&self, source_text: &str, draft_text: &str) -> CheckReport {
        let options = IndexOptions {
            merge_line_breaks: self.config.merge_line_breaks,
        };
        let index = SentenceIndex::build(source_text, &options);
        let body = index.body_tokens();

        let mut quotes = Vec::new();
        let mut error_count = 0;
        for span in extract_quotes(draft_text) {
            let mut fragments = Vec::new();
            let mut quote_errors = 0;
            for (sent, gap) in split_sentences(&span.content) {
                let fragment = self.check_fragment(&sent, gap, &index, body);
                quote_errors += fragment.error_count;
                fragments.push(fragment);
            }
            error_count += quote_errors;
            quotes.push(QuoteCheck {
                span,
                fragments,
                error_count: quote_errors,
            });
        }

        let draft = assemble_draft(draft_text, &quotes);
        let source = AnnotatedSource::from_index(&index);
        let status = if error_count == 0 {
            CheckStatus::Correct
        } else {
            CheckStatus::MisquotesPresent
        };

        CheckReport {
            status,
            error_count,
            quotes,
            draft,
            source,
        }
    }

    fn check_fragment(
        &self,
        sent: &str,
        trailing_gap: String,
        index: &SentenceIndex,
        body: &[String],
    ) -> FragmentCheck {
        if sent.trim().is_empty() {
            // Nothing checkable; carry the text through untouched.
            let segments = if sent.is_empty() {
                Vec::new()
            } else {
                vec![Segment {
                    kind: SegmentKind::Plain,
                    text: sent.to_string(),
                    token_start: 0,
                    token_end: 0,
                }]
            };
            return FragmentCheck {
                text: sent.to_string(),
                trailing_gap,
                tokens: Vec::new(),
                window: None,
                sentence_id: None,
                verdicts: Vec::new(),
                segments,
                error_count: 0,
            };
        }

        let tokens = tokenize(sent);
        let norm: Vec<String> = tokens
            .iter()
            .map(|t| {
                if t.is_word() {
                    normalize(&t.text)
                } else {
                    t.text.clone()
                }
            })
            .collect();

        if index.is_empty() {
            let classified = passthrough_fragment(&tokens);
            return FragmentCheck {
                text: sent.to_string(),
                trailing_gap,
                tokens,
                window: None,
                sentence_id: None,
                verdicts: classified.verdicts,
                segments: classified.segments,
                error_count: classified.error_count,
            };
        }

        let window = best_window(&norm, body);
        let window_slice = &body[window.start..window.start + window.len];
        let classified = classify_fragment(
            &tokens,
            &norm,
            window_slice,
            window.score,
            self.config.similarity_floor,
            self.config.min_equal_run,
        );
        let sentence_id = map_to_sentence(sent, index);

        FragmentCheck {
            text: sent.to_string(),
            trailing_gap,
            tokens,
            window: Some(window),
            sentence_id,
            verdicts: classified.verdicts,
            segments: classified.segments,
            error_count: classified.error_count,
        }
    }
}

/// Interleave unchecked draft text with the per-quote segments.
fn assemble_draft(draft_text: &str, quotes: &[QuoteCheck]) -> AnnotatedDraft {
    let mut draft = AnnotatedDraft::default();
    let mut cursor = 0;
    for quote in quotes {
        draft.push_plain(&draft_text[cursor..quote.span.start]);
        draft.push_plain(quote.span.open.encode_utf8(&mut [0u8; 4]));
        for fragment in &quote.fragments {
            for segment in &fragment.segments {
                match segment.kind {
                    SegmentKind::Phrase => {
                        draft.push_matched(fragment.sentence_id, segment.text.clone())
                    }
                    SegmentKind::Flagged => draft.push_flagged(segment.text.clone()),
                    SegmentKind::Plain => draft.push_plain(&segment.text),
                }
            }
            draft.push_plain(&fragment.trailing_gap);
        }
        draft.push_plain(quote.span.close.encode_utf8(&mut [0u8; 4]));
        cursor = quote.span.end;
    }
    draft.push_plain(&draft_text[cursor..]);
    draft
}
