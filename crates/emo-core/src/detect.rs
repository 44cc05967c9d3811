//! Lexicon scan over a single text.
//!
//! For every lexicon word (positive words first, then negative, each in
//! lexicon order) the text is searched repeatedly, restarting one code unit
//! past the start of the previous match. Overlapping occurrences of the same
//! word are therefore all reported. Output is grouped by word, not sorted by
//! offset.

use crate::id::NodeId;
use crate::lexicon::ENCODED;
use crate::model::Detection;
use smallvec::SmallVec;

/// Most texts on a board hit a handful of words at most.
pub type Detections = SmallVec<[Detection; 4]>;

/// Scan `text` for lexicon words. Offsets are UTF-16 code units.
#[must_use]
pub fn detect(text: &str, node_id: NodeId) -> Detections {
    let mut out = Detections::new();
    if text.is_empty() {
        return out;
    }

    let haystack: Vec<u16> = text.encode_utf16().collect();
    for encoded in ENCODED.iter() {
        let mut from = 0;
        while let Some(start) = find_from(&haystack, &encoded.units, from) {
            out.push(Detection {
                word: encoded.entry.word,
                category: encoded.entry.category,
                node_id,
                start_index: start,
                end_index: start + encoded.units.len(),
            });
            from = start + 1;
        }
    }
    out
}

/// First index `>= from` where `needle` occurs in `haystack`.
fn find_from(haystack: &[u16], needle: &[u16], from: usize) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    let last = haystack.len() - needle.len();
    (from..=last).find(|&i| haystack[i..i + needle.len()] == *needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Category;

    fn spans(found: &Detections) -> Vec<(&str, usize, usize)> {
        found
            .iter()
            .map(|d| (d.word, d.start_index, d.end_index))
            .collect()
    }

    #[test]
    fn adjacent_repeats_are_both_found() {
        let id = NodeId::intern("t");
        let found = detect("嬉しい嬉しい", id);
        assert_eq!(spans(&found), [("嬉しい", 0, 3), ("嬉しい", 3, 6)]);
        assert!(found.iter().all(|d| d.category == Category::Positive));
        assert!(found.iter().all(|d| d.node_id == id));
    }

    #[test]
    fn empty_text_has_no_detections() {
        assert!(detect("", NodeId::intern("t")).is_empty());
    }

    #[test]
    fn restart_one_past_match_finds_each_occurrence_once() {
        let found = detect("大変大変", NodeId::intern("t"));
        assert_eq!(spans(&found), [("大変", 0, 2), ("大変", 2, 4)]);
    }

    #[test]
    fn text_shorter_than_word_yields_nothing_for_it() {
        let found = detect("めんど", NodeId::intern("t"));
        assert!(found.is_empty());
    }

    #[test]
    fn positive_matches_precede_negative_regardless_of_offset() {
        let found = detect("不安だけど安心", NodeId::intern("t"));
        assert_eq!(spans(&found), [("安心", 5, 7), ("不安", 0, 2)]);
    }

    #[test]
    fn words_sharing_characters_are_reported_independently() {
        // 不安 contains 安 but not 安心; 安心 and 心配 overlap on 心.
        let found = detect("安心配", NodeId::intern("t"));
        assert_eq!(spans(&found), [("安心", 0, 2), ("心配", 1, 3)]);
    }

    #[test]
    fn offsets_count_utf16_units_not_bytes() {
        // The emoji is a surrogate pair: two code units.
        let found = detect("😀楽", NodeId::intern("t"));
        assert_eq!(spans(&found), [("楽", 2, 3)]);
    }

    #[test]
    fn find_from_handles_out_of_range_start() {
        assert_eq!(find_from(&[1, 2, 3], &[3], 5), None);
        assert_eq!(find_from(&[1, 2, 3], &[2, 3], 1), Some(1));
        assert_eq!(find_from(&[1], &[1, 2], 0), None);
    }
}
