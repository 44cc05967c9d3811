pub mod collect;
pub mod config;
pub mod detect;
pub mod id;
pub mod lexicon;
pub mod marker;
pub mod model;
pub mod page;
pub mod summary;

pub use collect::collect_text_units;
pub use config::{AnalysisConfig, CleanupPolicy};
pub use detect::{Detections, detect};
pub use id::NodeId;
pub use lexicon::{Category, LexiconEntry, words_for};
pub use marker::{MarkerStyle, glyph_for, is_marker_glyph};
pub use model::*;
pub use page::CanvasPage;
pub use summary::{EmotionCount, summarize};

