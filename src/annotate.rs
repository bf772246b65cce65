//! Annotated output structures for rendering the checked draft and the
//! source document.
//!
//! Both sides are flat node lists ready for a renderer: the draft is one
//! stream of plain / matched / flagged runs whose texts concatenate back to
//! the input, and the source is a list of lines whose sentence parts carry
//! their identifiers so matched draft runs can be linked back.

use serde::{Deserialize, Serialize};

use crate::normalize::unify_punctuation;
use crate::sentence_index::{LinePart, SentenceIndex};

/// A run of draft text with its verification outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DraftNode {
    /// Unchecked text: prose outside quotes, delimiters, whitespace.
    Plain { text: String },
    /// A verified quoted run, linked to the source sentence it came from.
    Matched {
        sentence_id: Option<usize>,
        text: String,
    },
    /// A quoted word that disagrees with the source.
    Flagged { text: String },
}

/// The full draft, annotated. Node texts concatenate to the input draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedDraft {
    pub nodes: Vec<DraftNode>,
}

impl AnnotatedDraft {
    /// Append plain text, coalescing into a trailing plain node.
    pub(crate) fn push_plain(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(DraftNode::Plain { text: last }) = self.nodes.last_mut() {
            last.push_str(text);
            return;
        }
        self.nodes.push(DraftNode::Plain {
            text: text.to_string(),
        });
    }

    pub(crate) fn push_matched(&mut self, sentence_id: Option<usize>, text: String) {
        self.nodes.push(DraftNode::Matched { sentence_id, text });
    }

    pub(crate) fn push_flagged(&mut self, text: String) {
        self.nodes.push(DraftNode::Flagged { text });
    }

    /// The draft text reassembled from the node stream.
    pub fn plain_text(&self) -> String {
        self.nodes
            .iter()
            .map(|n| match n {
                DraftNode::Plain { text }
                | DraftNode::Matched { text, .. }
                | DraftNode::Flagged { text } => text.as_str(),
            })
            .collect()
    }
}

/// A run of source text within one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SourceNode {
    Plain { text: String },
    Sentence { sentence_id: usize, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLine {
    pub source_line: usize,
    pub nodes: Vec<SourceNode>,
}

/// The source document, line by line, with addressable sentences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedSource {
    pub lines: Vec<SourceLine>,
}

impl AnnotatedSource {
    pub(crate) fn from_index(index: &SentenceIndex) -> Self {
        let mut lines = Vec::new();
        for line in index.lines() {
            let mut nodes = Vec::new();
            let has_sentence = line
                .parts
                .iter()
                .any(|p| matches!(p, LinePart::Sentence { .. }));
            if !has_sentence {
                let text = unify_punctuation(&line.text);
                if !text.is_empty() {
                    nodes.push(SourceNode::Plain { text });
                }
            } else {
                for part in &line.parts {
                    match part {
                        LinePart::Gap { text } => {
                            nodes.push(SourceNode::Plain { text: text.clone() })
                        }
                        LinePart::Sentence { id } => {
                            let raw = index
                                .get(*id)
                                .map(|s| s.raw.as_str())
                                .unwrap_or_default();
                            let (lead, core, trail) = split_edge_glyphs(raw);
                            if !lead.is_empty() {
                                nodes.push(SourceNode::Plain {
                                    text: lead.to_string(),
                                });
                            }
                            nodes.push(SourceNode::Sentence {
                                sentence_id: *id,
                                text: unify_punctuation(core),
                            });
                            if !trail.is_empty() {
                                nodes.push(SourceNode::Plain {
                                    text: trail.to_string(),
                                });
                            }
                        }
                    }
                }
            }
            lines.push(SourceLine {
                source_line: line.source_line,
                nodes,
            });
        }
        Self { lines }
    }
}

fn is_edge_glyph(c: char) -> bool {
    matches!(c, '"' | '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}')
}

/// Split a leading and a trailing quote glyph off a sentence so they render
/// as plain filler rather than part of the addressable sentence text. The
/// same glyph is never both lead and trail.
fn split_edge_glyphs(raw: &str) -> (&str, &str, &str) {
    let (lead, rest) = match raw.chars().next() {
        Some(c) if is_edge_glyph(c) => raw.split_at(c.len_utf8()),
        _ => ("", raw),
    };
    let (core, trail) = match rest.chars().last() {
        Some(c) if is_edge_glyph(c) && rest.len() > c.len_utf8() => {
            rest.split_at(rest.len() - c.len_utf8())
        }
        _ => (rest, ""),
    };
    (lead, core, trail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_plain_runs_coalesce() {
        let mut draft = AnnotatedDraft::default();
        draft.push_plain("He said ");
        draft.push_plain("\u{201C}");
        draft.push_matched(Some(0), "hi".to_string());
        draft.push_plain("\u{201D}");
        draft.push_plain(".");
        assert_eq!(draft.nodes.len(), 3);
        assert_eq!(draft.plain_text(), "He said \u{201C}hi\u{201D}.");
    }

    #[test]
    fn edge_glyphs_split_off() {
        assert_eq!(
            split_edge_glyphs("\u{201C}Hello there.\u{201D}"),
            ("\u{201C}", "Hello there.", "\u{201D}")
        );
        assert_eq!(split_edge_glyphs("No glyphs."), ("", "No glyphs.", ""));
        // A lone glyph is a lead, never doubled as a trail too.
        assert_eq!(split_edge_glyphs("\u{201D}"), ("\u{201D}", "", ""));
    }
}
