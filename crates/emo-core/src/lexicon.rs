//! Fixed emotion lexicon: category → ordered trigger words.
//!
//! Word order is significant. The detector reports matches word by word in
//! the order listed here, positive category first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Emotion category of a lexicon word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Positive,
    Negative,
}

impl Category {
    /// All categories in scan order.
    pub const ALL: [Category; 2] = [Category::Positive, Category::Negative];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Positive => "positive",
            Category::Negative => "negative",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const POSITIVE: &[&str] = &["嬉しい", "安心", "楽"];

const NEGATIVE: &[&str] = &["大変", "めんどくさい", "手間", "煩雑", "不安", "心配"];

/// Trigger words for `category`, in lexicon order.
pub fn words_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::Positive => POSITIVE,
        Category::Negative => NEGATIVE,
    }
}

/// One `(category, word)` pair of the lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconEntry {
    pub category: Category,
    pub word: &'static str,
}

/// Every lexicon entry in scan order (positive words, then negative words).
pub fn entries() -> impl Iterator<Item = LexiconEntry> {
    Category::ALL.into_iter().flat_map(|category| {
        words_for(category)
            .iter()
            .map(move |&word| LexiconEntry { category, word })
    })
}

/// A lexicon entry with its word pre-encoded as UTF-16, the host's string unit.
pub(crate) struct EncodedEntry {
    pub entry: LexiconEntry,
    pub units: Vec<u16>,
}

pub(crate) static ENCODED: LazyLock<Vec<EncodedEntry>> = LazyLock::new(|| {
    entries()
        .map(|entry| EncodedEntry {
            entry,
            units: entry.word.encode_utf16().collect(),
        })
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn words_are_distinct_and_non_empty() {
        for category in Category::ALL {
            let words = words_for(category);
            let unique: HashSet<_> = words.iter().collect();
            assert_eq!(unique.len(), words.len(), "duplicate word in {category}");
            assert!(words.iter().all(|w| !w.is_empty()));
        }
    }

    #[test]
    fn entries_follow_scan_order() {
        let all: Vec<_> = entries().collect();
        assert_eq!(all.len(), POSITIVE.len() + NEGATIVE.len());
        assert_eq!(all[0].word, "嬉しい");
        assert_eq!(all[0].category, Category::Positive);
        assert_eq!(all[POSITIVE.len()].word, "大変");
        assert_eq!(all[POSITIVE.len()].category, Category::Negative);
    }

    #[test]
    fn encoded_lengths_are_utf16_units() {
        let joy = ENCODED.iter().find(|e| e.entry.word == "嬉しい").unwrap();
        assert_eq!(joy.units.len(), 3);
    }
}
