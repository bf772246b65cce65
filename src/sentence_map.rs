//! Cross-referencing quote fragments to source sentences.
//!
//! Substring containment decides first: if the fragment's normalized text
//! occurs inside any sentence's normalized text, the earliest such sentence
//! wins. Otherwise the sentence with the highest character-level similarity
//! is chosen, a best-effort guess that never fails, even at low
//! confidence. Only an index with no sentences at all yields `None`.

use crate::normalize::normalize;
use crate::sentence_index::SentenceIndex;
use crate::similarity::char_ratio;

/// Map a fragment's sentence text to a source sentence identifier.
pub fn map_to_sentence(fragment_text: &str, index: &SentenceIndex) -> Option<usize> {
    let sentences = index.sentences();
    if sentences.is_empty() {
        return None;
    }

    let needle = normalize(fragment_text);
    for sentence in sentences {
        if sentence.normalized.contains(&needle) {
            return Some(sentence.id);
        }
    }

    // O(S) fallback; first maximum wins.
    let mut best_id = sentences[0].id;
    let mut best_score = -1.0;
    for sentence in sentences {
        let score = char_ratio(&needle, &sentence.normalized);
        if score > best_score {
            best_id = sentence.id;
            best_score = score;
        }
    }
    Some(best_id)
}
