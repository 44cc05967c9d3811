//! Analysis configuration.
//!
//! Every field has a default, so a partial JSON object (or none at all) is a
//! valid configuration.

use crate::marker::MarkerStyle;
use serde::{Deserialize, Serialize};

/// How the cleaner recognises markers it created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupPolicy {
    /// Any text node whose content is exactly a marker glyph.
    /// User-authored nodes holding just a glyph are removed too.
    Glyph,
    /// Glyph match plus the marker metadata tag. Falls back to `Glyph` on
    /// hosts without node metadata.
    #[default]
    Tagged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisConfig {
    pub marker: MarkerStyle,
    pub cleanup: CleanupPolicy,
    /// Error shown when the selection holds no text.
    pub empty_selection_message: String,
    /// Error shown when an analysis is requested while one is running.
    pub busy_message: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            marker: MarkerStyle::default(),
            cleanup: CleanupPolicy::default(),
            empty_selection_message: "テキストを選択してください。".into(),
            busy_message: "分析中です。完了またはキャンセルしてから再実行してください。".into(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns the deserializer's message when `json` is malformed.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid config: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(AnalysisConfig::from_json("{}").unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn partial_marker_override() {
        let config =
            AnalysisConfig::from_json(r#"{"marker":{"fontSize":32},"cleanup":"glyph"}"#).unwrap();
        assert_eq!(config.marker.font_size, 32.0);
        assert_eq!(config.marker.offset_y, -30.0);
        assert_eq!(config.cleanup, CleanupPolicy::Glyph);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let err = AnalysisConfig::from_json(r#"{"cleanup":"never"}"#).unwrap_err();
        assert!(err.starts_with("invalid config"));
    }
}
