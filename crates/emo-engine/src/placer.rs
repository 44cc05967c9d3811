//! Marker placement.
//!
//! Each detection gets its own marker, placed at a fixed offset from the
//! owning node's bounding box. A detection whose node vanished, has no
//! bounds, or whose marker cannot be created is skipped; the batch always
//! runs to the end.

use crate::host::{CanvasHost, TextProps};
use emo_core::id::NodeId;
use emo_core::marker::{MarkerStyle, glyph_for};
use emo_core::model::Detection;

/// Outcome counts of one placement batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementReport {
    pub placed: usize,
    pub skipped: usize,
    /// Placed markers the host failed to tag, though it supports metadata.
    /// The tagged cleanup policy cannot find these.
    pub untagged: usize,
}

/// Why a single marker was not placed.
#[derive(Debug)]
enum Skip {
    /// Node removed since the selection snapshot.
    Stale,
    Unavailable(String),
}

/// Create one marker per detection.
pub async fn place_markers<H: CanvasHost>(
    host: &H,
    detections: &[Detection],
    style: &MarkerStyle,
) -> PlacementReport {
    let mut report = PlacementReport::default();
    for detection in detections {
        match place_one(host, detection, style).await {
            Ok((marker, tagged)) => {
                if !tagged && host.supports_metadata() {
                    log::warn!("marker {marker} could not be tagged; tagged cleanup will keep it");
                    report.untagged += 1;
                }
                log::trace!(
                    "placed {} marker {marker} for {:?} on {}",
                    detection.category,
                    detection.word,
                    detection.node_id
                );
                report.placed += 1;
            }
            Err(Skip::Stale) => {
                log::debug!("skipping marker: node {} no longer exists", detection.node_id);
                report.skipped += 1;
            }
            Err(Skip::Unavailable(reason)) => {
                log::warn!("skipping marker for {}: {reason}", detection.node_id);
                report.skipped += 1;
            }
        }
    }
    log::info!(
        "markers placed: {}, skipped: {}, untagged: {}",
        report.placed,
        report.skipped,
        report.untagged
    );
    report
}

async fn place_one<H: CanvasHost>(
    host: &H,
    detection: &Detection,
    style: &MarkerStyle,
) -> Result<(NodeId, bool), Skip> {
    let node = host.resolve_node(detection.node_id).ok_or(Skip::Stale)?;
    let bounds = node
        .bounds
        .ok_or_else(|| Skip::Unavailable("no bounding box".into()))?;

    host.load_font(&style.font)
        .await
        .map_err(|e| Skip::Unavailable(format!("marker font {}: {e}", style.font)))?;

    let marker = host.create_text().map_err(Skip::Unavailable)?;
    let (x, y) = style.position(&bounds);
    let props = TextProps {
        characters: glyph_for(detection.category).to_string(),
        font: style.font.clone(),
        font_size: style.font_size,
        x,
        y,
    };

    let attached = host
        .set_text_props(marker, &props)
        .and_then(|()| host.append_to_current_page(marker));
    if let Err(e) = attached {
        // Don't leave an empty text node behind.
        host.remove(marker);
        return Err(Skip::Unavailable(e));
    }

    let tagged = host.set_marker_tag(marker, detection.category.as_str());
    Ok((marker, tagged))
}
