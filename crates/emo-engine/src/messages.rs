//! UI ↔ plugin message types.
//!
//! Both directions are JSON objects tagged by `type`:
//!
//! ```text
//! → {"type":"analyze-emotions"}
//! ← {"type":"analysis-complete","count":{"positive":1,"negative":0}}
//! ```

use emo_core::summary::EmotionCount;
use serde::{Deserialize, Serialize};

/// Requests sent by the UI panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiRequest {
    AnalyzeEmotions,
    CancelAnalysis,
    ClearEmojis,
}

impl UiRequest {
    /// Parse a raw JSON message.
    ///
    /// # Errors
    /// Returns a description when the JSON is malformed or the `type` is unknown.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("unrecognized UI message: {e}"))
    }
}

/// Notifications sent back to the UI panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PluginMessage {
    Error { message: String },
    AnalysisComplete { count: EmotionCount },
    Canceled,
    EmojisCleared { removed: usize },
}

impl PluginMessage {
    pub fn to_json(&self) -> String {
        // Every variant is a plain struct of strings and integers.
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"error"}"#.to_string())
    }
}
