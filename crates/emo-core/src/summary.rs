use crate::lexicon::Category;
use crate::model::Detection;
use serde::{Deserialize, Serialize};

/// Per-category detection counts reported to the UI after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub positive: usize,
    pub negative: usize,
}

impl EmotionCount {
    pub fn total(&self) -> usize {
        self.positive + self.negative
    }
}

/// Count detections by category.
#[must_use]
pub fn summarize(detections: &[Detection]) -> EmotionCount {
    detections
        .iter()
        .fold(EmotionCount::default(), |mut count, d| {
            match d.category {
                Category::Positive => count.positive += 1,
                Category::Negative => count.negative += 1,
            }
            count
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::detect;
    use crate::id::NodeId;

    #[test]
    fn empty_run_counts_zero() {
        assert_eq!(summarize(&[]), EmotionCount::default());
    }

    #[test]
    fn counts_by_category() {
        let found = detect("楽だけど手間で心配", NodeId::intern("t"));
        let count = summarize(&found);
        assert_eq!(
            count,
            EmotionCount {
                positive: 1,
                negative: 2
            }
        );
        assert_eq!(count.total(), 3);
    }
}
