//! Source-document sentence indexing.
//!
//! The source text is segmented into line-scoped sentences, each assigned a
//! stable integer identifier in document order during a single pass.
//! Identifiers are never reused or reordered within a run. The index is the
//! sole owner of the sentence list; everything downstream reads it
//! immutably.
//!
//! A sentence boundary follows `.`, `!`, or `?` immediately followed by
//! whitespace. Lines with no terminator form a single sentence, or, with
//! [`IndexOptions::merge_line_breaks`] enabled, are joined to the
//! following line first, so a sentence broken mid-way across a line break
//! is indexed as one unit. A blank line acts as an explicit end-marker and
//! stops merging.
//!
//! The index also builds the flattened body token stream (all sentences
//! joined by single spaces, normalized, tokenized) once; every alignment
//! reuses it.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;
use crate::token::tokenize;

/// A detected source sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    /// Stable identifier, assigned in document order.
    pub id: usize,
    /// Exact text as it appeared (line breaks replaced by spaces when the
    /// sentence was merged across lines).
    pub raw: String,
    /// Normalized form used for comparison.
    pub normalized: String,
    /// Index of the logical line the sentence starts on.
    pub line: usize,
}

/// One piece of a line: either a detected sentence or verbatim filler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LinePart {
    Sentence { id: usize },
    Gap { text: String },
}

/// A logical line of the source with its sentence decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedLine {
    /// Index of the first physical line this logical line covers.
    pub source_line: usize,
    /// Full text of the logical line.
    pub text: String,
    pub parts: Vec<LinePart>,
}

/// Indexing behavior toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    /// Join a line with the next when it does not end in a sentence
    /// terminator, so mid-sentence line breaks do not split sentences.
    pub merge_line_breaks: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            merge_line_breaks: true,
        }
    }
}

/// Canonical sentence list plus per-line structure and the body token
/// stream.
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceIndex {
    sentences: Vec<Sentence>,
    lines: Vec<IndexedLine>,
    body_tokens: Vec<String>,
}

impl SentenceIndex {
    /// Index `source` in a single pass.
    pub fn build(source: &str, options: &IndexOptions) -> Self {
        let mut sentences: Vec<Sentence> = Vec::new();
        let mut lines = Vec::new();

        for (logical_idx, (first_physical, text)) in
            logical_lines(source, options.merge_line_breaks)
                .into_iter()
                .enumerate()
        {
            let mut parts = Vec::new();
            for (sent, gap) in split_sentences(&text) {
                if sent.trim().is_empty() {
                    if !sent.is_empty() {
                        parts.push(LinePart::Gap { text: sent });
                    }
                } else {
                    let id = sentences.len();
                    sentences.push(Sentence {
                        id,
                        normalized: normalize(&sent),
                        raw: sent,
                        line: logical_idx,
                    });
                    parts.push(LinePart::Sentence { id });
                }
                if !gap.is_empty() {
                    parts.push(LinePart::Gap { text: gap });
                }
            }
            lines.push(IndexedLine {
                source_line: first_physical,
                text,
                parts,
            });
        }

        let body = sentences
            .iter()
            .map(|s| s.raw.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let body_tokens = tokenize(&normalize(&body))
            .into_iter()
            .map(|t| t.text)
            .collect();

        Self {
            sentences,
            lines,
            body_tokens,
        }
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn get(&self, id: usize) -> Option<&Sentence> {
        self.sentences.get(id)
    }

    pub fn lines(&self) -> &[IndexedLine] {
        &self.lines
    }

    /// Normalized token stream over all sentences, built once at indexing.
    pub fn body_tokens(&self) -> &[String] {
        &self.body_tokens
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Partition `text` into (sentence, gap) pairs. A boundary follows `.`,
/// `!`, or `?` when the next character is whitespace; the gap is the
/// maximal whitespace run after the terminator.
pub(crate) fn split_sentences(text: &str) -> Vec<(String, String)> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut out = Vec::new();
    let mut seg_start = 0;
    let mut idx = 0;
    while idx < chars.len() {
        let c = chars[idx].1;
        let next_is_ws = matches!(chars.get(idx + 1), Some((_, n)) if n.is_whitespace());
        if matches!(c, '.' | '!' | '?') && next_is_ws {
            let sent_end = chars[idx + 1].0;
            let mut j = idx + 1;
            while j < chars.len() && chars[j].1.is_whitespace() {
                j += 1;
            }
            let gap_end = chars.get(j).map(|(b, _)| *b).unwrap_or(text.len());
            out.push((
                text[seg_start..sent_end].to_string(),
                text[sent_end..gap_end].to_string(),
            ));
            seg_start = gap_end;
            idx = j;
        } else {
            idx += 1;
        }
    }
    if seg_start < text.len() {
        out.push((text[seg_start..].to_string(), String::new()));
    }
    out
}

/// Collapse physical lines into logical lines, pairing each with the index
/// of its first physical line.
fn logical_lines(source: &str, merge: bool) -> Vec<(usize, String)> {
    let physical: Vec<&str> = source.split('\n').collect();
    if !merge {
        return physical
            .into_iter()
            .enumerate()
            .map(|(i, l)| (i, l.to_string()))
            .collect();
    }
    let mut out = Vec::new();
    let mut i = 0;
    while i < physical.len() {
        let first = i;
        let mut text = physical[i].to_string();
        while continues_on_next_line(&text)
            && i + 1 < physical.len()
            && !physical[i + 1].trim().is_empty()
        {
            i += 1;
            text.push(' ');
            text.push_str(physical[i]);
        }
        out.push((first, text));
        i += 1;
    }
    out
}

/// True when a line's last meaningful character is not a sentence
/// terminator, i.e. the sentence appears to run on past the line break.
/// Closing quote glyphs and brackets after the terminator are ignored.
fn continues_on_next_line(text: &str) -> bool {
    let trimmed = text
        .trim_end()
        .trim_end_matches(|c: char| matches!(c, '"' | '\u{201D}' | '\u{2019}' | '\'' | ')' | ']'));
    match trimmed.chars().last() {
        Some('.') | Some('!') | Some('?') => false,
        Some(_) => true,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_on_terminator_plus_whitespace() {
        let parts = split_sentences("First one. Second one! Third?");
        assert_eq!(
            parts,
            vec![
                ("First one.".to_string(), " ".to_string()),
                ("Second one!".to_string(), " ".to_string()),
                ("Third?".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn terminator_without_whitespace_does_not_split() {
        let parts = split_sentences("Version 2.5 shipped");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].0, "Version 2.5 shipped");
    }

    #[test]
    fn ellipsis_followed_by_space_splits() {
        let parts = split_sentences("Wait... then go.");
        assert_eq!(parts[0].0, "Wait...");
        assert_eq!(parts[1].0, "then go.");
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(split_sentences("").is_empty());
    }
}
