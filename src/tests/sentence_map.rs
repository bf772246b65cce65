use crate::sentence_index::{IndexOptions, SentenceIndex};
use crate::sentence_map::map_to_sentence;

fn index(source: &str) -> SentenceIndex {
    SentenceIndex::build(source, &IndexOptions::default())
}

#[test]
fn substring_containment_wins() {
    let idx = index("Alpha beta gamma. Delta epsilon.");
    assert_eq!(map_to_sentence("Delta epsilon", &idx), Some(1));
}

#[test]
fn containment_is_case_and_glyph_insensitive() {
    let idx = index("He said \u{201C}never again\u{201D} twice.");
    assert_eq!(map_to_sentence("NEVER AGAIN", &idx), Some(0));
}

#[test]
fn earliest_containing_sentence_wins() {
    let idx = index("Echo here. Echo here again.");
    assert_eq!(map_to_sentence("Echo", &idx), Some(0));
}

#[test]
fn falls_back_to_character_similarity() {
    let idx = index("Alpha beta gamma. Completely different words.");
    assert_eq!(map_to_sentence("Alpha betta gamma", &idx), Some(0));
}

#[test]
fn empty_source_maps_nothing() {
    let idx = index("");
    assert_eq!(map_to_sentence("anything", &idx), None);
}
