//! Marker cleanup.
//!
//! Markers are not tracked after creation; they are rediscovered by content.
//! Under [`CleanupPolicy::Glyph`] any text node whose content is exactly a
//! marker glyph is removed, including one a user typed by hand. Under
//! [`CleanupPolicy::Tagged`] the marker tag is also required, when the host
//! supports metadata.

use crate::host::CanvasHost;
use emo_core::config::CleanupPolicy;
use emo_core::marker::is_marker_glyph;

/// Remove every marker on the current page. Returns how many were removed.
pub fn clear_markers<H: CanvasHost>(host: &H, policy: CleanupPolicy) -> usize {
    let require_tag = policy == CleanupPolicy::Tagged && host.supports_metadata();

    let candidates =
        host.find_text_nodes(&|node| node.characters.as_deref().is_some_and(is_marker_glyph));

    let mut removed = 0;
    for node in candidates {
        if require_tag && host.marker_tag(node.id).is_none() {
            log::debug!("keeping untagged glyph node {}", node.id);
            continue;
        }
        if host.remove(node.id) {
            removed += 1;
        }
    }
    log::info!("markers cleared: {removed}");
    removed
}
