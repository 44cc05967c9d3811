//! Emotion marker engine.
//!
//! Drives an analysis over a host canvas: snapshot the selection, collect
//! text, detect lexicon words, place markers, and report counts. The host and
//! the UI are reached only through the traits in [`host`].

pub mod analyzer;
pub mod cleaner;
pub mod host;
#[cfg(feature = "memory")]
pub mod memory;
pub mod messages;
pub mod placer;
pub mod plugin;
pub mod run;

pub use analyzer::{ActiveRun, AnalyzeError, Analyzer, ScanOutcome};
pub use host::{CanvasHost, TextProps, UiChannel};
#[cfg(feature = "memory")]
pub use memory::{MemoryHost, RecordingUi};
pub use messages::{PluginMessage, UiRequest};
pub use placer::PlacementReport;
pub use plugin::{Plugin, RunSummary};
pub use run::{CancelToken, RunState};
