//! Analysis orchestration: selection snapshot → text units → detections.
//!
//! A run moves `Idle → Scanning → (Completed | Cancelled)`. [`Analyzer::begin`]
//! snapshots the selection, collects text units and claims the run slot;
//! [`ActiveRun::scan`] walks the units in collector order, checking the
//! cancellation token before each one. Cancellation is only observed at
//! unit boundaries: a font load already awaited runs to completion.

use crate::host::CanvasHost;
use crate::run::{RunLease, RunSlot, RunState};
use emo_core::collect::collect_text_units;
use emo_core::detect::detect;
use emo_core::model::{Capability, Detection, TextUnit};
use std::fmt;

/// Why an analysis could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeError {
    /// The selection holds no text-bearing node.
    EmptySelection,
    /// Another run is still active.
    Busy,
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzeError::EmptySelection => f.write_str("selection contains no text"),
            AnalyzeError::Busy => f.write_str("an analysis is already running"),
        }
    }
}

impl std::error::Error for AnalyzeError {}

/// Result of the scanning phase.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    /// `Completed` or `Cancelled`.
    pub state: RunState,
    /// Detections in unit order, each unit's in detector order.
    pub detections: Vec<Detection>,
    /// Units whose text was scanned.
    pub units_scanned: usize,
    /// Units skipped (node gone, empty text, font failure).
    pub units_skipped: usize,
}

/// Owner of the run slot.
#[derive(Debug, Default)]
pub struct Analyzer {
    slot: RunSlot,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the selection and enter `Scanning`.
    ///
    /// # Errors
    /// `Busy` if a run is active, `EmptySelection` if the selection yields
    /// no text units. In both cases no run is started.
    pub fn begin<H: CanvasHost>(&self, host: &H) -> Result<ActiveRun<'_>, AnalyzeError> {
        let lease = self.slot.acquire().ok_or(AnalyzeError::Busy)?;

        let selection = host.current_selection();
        let units = collect_text_units(&selection);
        if units.is_empty() {
            log::info!(
                "analysis not started: {} selected node(s), no text",
                selection.len()
            );
            return Err(AnalyzeError::EmptySelection);
        }

        log::info!(
            "analysis started: {} text unit(s) from {} selected node(s)",
            units.len(),
            selection.len()
        );
        Ok(ActiveRun { lease, units })
    }

    /// Request cancellation of the scanning run. Returns `false` (and does
    /// nothing) when no run is scanning.
    pub fn cancel(&self) -> bool {
        let cancelled = self.slot.cancel();
        if cancelled {
            log::info!("analysis cancellation requested");
        } else {
            log::debug!("cancel ignored: no analysis is scanning");
        }
        cancelled
    }

    pub fn is_scanning(&self) -> bool {
        self.slot.is_scanning()
    }

    pub fn is_busy(&self) -> bool {
        self.slot.is_busy()
    }
}

/// One run between `begin` and the end of reporting. Dropping it releases
/// the analyzer for the next run.
#[derive(Debug)]
pub struct ActiveRun<'a> {
    lease: RunLease<'a>,
    units: Vec<TextUnit>,
}

impl ActiveRun<'_> {
    /// Scan every unit until done or cancelled.
    ///
    /// Text nodes await their font before being read; sticky notes skip the
    /// font step. Content is resolved from the host after that step, so
    /// edits made while an earlier unit was suspended are seen. Units whose
    /// node vanished, whose text is empty, or whose font fails to load are
    /// skipped. After this returns the run no longer accepts cancellation.
    pub async fn scan<H: CanvasHost>(&mut self, host: &H) -> ScanOutcome {
        let mut outcome = ScanOutcome {
            state: RunState::Completed,
            detections: Vec::new(),
            units_scanned: 0,
            units_skipped: 0,
        };

        for unit in std::mem::take(&mut self.units) {
            if self.lease.token().is_cancelled() {
                outcome.state = RunState::Cancelled;
                break;
            }

            if unit.needs_font {
                match &unit.font {
                    Some(font) => {
                        if let Err(e) = host.load_font(font).await {
                            log::warn!("skipping {}: font {font} failed to load: {e}", unit.node_id);
                            outcome.units_skipped += 1;
                            continue;
                        }
                    }
                    None => log::debug!("{} has no single font; reading as-is", unit.node_id),
                }
            }

            let Some(text) = read_content(host, &unit) else {
                outcome.units_skipped += 1;
                continue;
            };

            let found = detect(&text, unit.node_id);
            log::trace!("{}: {} detection(s)", unit.node_id, found.len());
            outcome.detections.extend(found);
            outcome.units_scanned += 1;
        }

        self.lease.finish_scanning();
        log::info!(
            "analysis {}: {} detection(s) from {} unit(s)",
            if outcome.state == RunState::Cancelled {
                "cancelled"
            } else {
                "completed"
            },
            outcome.detections.len(),
            outcome.units_scanned
        );
        outcome
    }
}

/// Current text of a unit's node, or `None` when it is gone or empty.
fn read_content<H: CanvasHost>(host: &H, unit: &TextUnit) -> Option<String> {
    let Some(node) = host.resolve_node(unit.node_id) else {
        log::debug!("skipping {}: node no longer exists", unit.node_id);
        return None;
    };
    let text = match node.capability() {
        Capability::Text { content, .. } => content,
        Capability::Sticky(text) => text,
        Capability::Container(_) | Capability::Opaque => "",
    };
    if text.is_empty() {
        log::trace!("skipping {}: empty text", unit.node_id);
        return None;
    }
    Some(text.to_string())
}
