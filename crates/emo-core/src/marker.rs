//! Marker glyphs and placement geometry.
//!
//! Markers are plain text nodes holding one reserved glyph per category.
//! Placement is a fixed offset from the owning node's bounding box; the
//! character offset of the match inside the text is not used.

use crate::lexicon::Category;
use crate::model::{Bounds, FontName};
use serde::{Deserialize, Serialize};

pub const POSITIVE_GLYPH: &str = "😊";
pub const NEGATIVE_GLYPH: &str = "😣";

/// The closed set of glyphs reserved for markers.
pub const MARKER_GLYPHS: [&str; 2] = [POSITIVE_GLYPH, NEGATIVE_GLYPH];

/// Node metadata key used to tag markers on hosts that support it.
pub const MARKER_TAG_KEY: &str = "emotion-marker";

pub fn glyph_for(category: Category) -> &'static str {
    match category {
        Category::Positive => POSITIVE_GLYPH,
        Category::Negative => NEGATIVE_GLYPH,
    }
}

/// Whether `content` is exactly one of the reserved glyphs.
pub fn is_marker_glyph(content: &str) -> bool {
    MARKER_GLYPHS.contains(&content)
}

/// Visual parameters for created markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkerStyle {
    pub font: FontName,
    pub font_size: f32,
    /// Horizontal offset from the node's left edge.
    pub offset_x: f32,
    /// Vertical offset from the node's top edge (negative = above).
    pub offset_y: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            font: FontName::new("Inter", "Regular"),
            font_size: 24.0,
            offset_x: 10.0,
            offset_y: -30.0,
        }
    }
}

impl MarkerStyle {
    /// Top-left position for a marker attached to a node with `bounds`.
    pub fn position(&self, bounds: &Bounds) -> (f32, f32) {
        (bounds.x + self.offset_x, bounds.y + self.offset_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_are_distinct_per_category() {
        assert_ne!(glyph_for(Category::Positive), glyph_for(Category::Negative));
        assert!(is_marker_glyph(glyph_for(Category::Positive)));
        assert!(is_marker_glyph(glyph_for(Category::Negative)));
    }

    #[test]
    fn glyph_check_is_exact() {
        assert!(!is_marker_glyph("😊😊"));
        assert!(!is_marker_glyph(" 😊"));
        assert!(!is_marker_glyph(""));
    }

    #[test]
    fn default_position_sits_above_the_node() {
        let style = MarkerStyle::default();
        let bounds = Bounds {
            x: 100.0,
            y: 200.0,
            width: 50.0,
            height: 20.0,
        };
        assert_eq!(style.position(&bounds), (110.0, 170.0));
    }
}
