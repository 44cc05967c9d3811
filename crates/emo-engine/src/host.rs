//! Collaborator contracts: the host canvas and the UI channel.
//!
//! The engine never owns canvas nodes. It reads snapshots through
//! [`CanvasHost`], asks the host to create or remove nodes, and reports to the
//! UI through [`UiChannel`]. Every method takes `&self`: the host may be
//! shared by several in-flight message handlers (an analysis suspended on a
//! font load while a clear request runs), so implementations use interior
//! mutability.

use crate::messages::PluginMessage;
use emo_core::id::NodeId;
use emo_core::model::{CanvasNode, FontName};
use std::future::Future;

/// Properties written to a freshly created text node.
#[derive(Debug, Clone, PartialEq)]
pub struct TextProps {
    pub characters: String,
    pub font: FontName,
    pub font_size: f32,
    pub x: f32,
    pub y: f32,
}

pub trait CanvasHost {
    /// Deep snapshot of the current selection, taken at call time.
    fn current_selection(&self) -> Vec<CanvasNode>;

    /// Current snapshot of a node, or `None` if it no longer exists.
    fn resolve_node(&self, id: NodeId) -> Option<CanvasNode>;

    /// Make `font` available. Must complete before text content of a node
    /// using it is read or written.
    fn load_font(&self, font: &FontName) -> impl Future<Output = Result<(), String>>;

    /// Create an empty text node and return its id.
    fn create_text(&self) -> Result<NodeId, String>;

    /// Write font, content, size and position of a text node. `props.font`
    /// must already be loaded.
    fn set_text_props(&self, id: NodeId, props: &TextProps) -> Result<(), String>;

    /// Attach a node to the current page.
    fn append_to_current_page(&self, id: NodeId) -> Result<(), String>;

    /// Every `TEXT` node on the current page matching `predicate`. Snapshots
    /// are shallow.
    fn find_text_nodes(&self, predicate: &dyn Fn(&CanvasNode) -> bool) -> Vec<CanvasNode>;

    /// Remove a node. Returns `false` if it was already gone.
    fn remove(&self, id: NodeId) -> bool;

    /// Attach marker metadata to a node. Returns `false` when the host has
    /// no node metadata.
    fn set_marker_tag(&self, _id: NodeId, _tag: &str) -> bool {
        false
    }

    /// Marker metadata of a node, if any.
    fn marker_tag(&self, _id: NodeId) -> Option<String> {
        None
    }

    /// Whether `set_marker_tag` / `marker_tag` are backed by real storage.
    fn supports_metadata(&self) -> bool {
        false
    }
}

/// Outbound side of the UI message channel.
pub trait UiChannel {
    fn post(&self, message: PluginMessage);
}
