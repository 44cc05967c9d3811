//! In-memory host and UI channel.
//!
//! `MemoryHost` implements [`CanvasHost`] over a [`CanvasPage`] and behaves
//! like a plugin host in the ways the engine depends on: font loads are real
//! suspension points, text can only be written once its font is loaded, and
//! new text nodes land on the page with a default font. `RecordingUi`
//! collects outbound messages. Both back the CLI and the test suites.

use crate::host::{CanvasHost, TextProps, UiChannel};
use crate::messages::PluginMessage;
use emo_core::id::NodeId;
use emo_core::marker::MARKER_TAG_KEY;
use emo_core::model::{Bounds, CanvasDocument, CanvasNode, FontName, NodeType};
use emo_core::page::CanvasPage;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

pub struct MemoryHost {
    page: Mutex<CanvasPage>,
    loaded_fonts: Mutex<Vec<FontName>>,
    missing_fonts: Vec<FontName>,
    font_delay: Option<Duration>,
    metadata: bool,
}

impl MemoryHost {
    pub fn new(page: CanvasPage) -> Self {
        Self {
            page: Mutex::new(page),
            loaded_fonts: Mutex::new(Vec::new()),
            missing_fonts: Vec::new(),
            font_delay: None,
            metadata: true,
        }
    }

    /// # Errors
    /// See [`CanvasPage::from_document`].
    pub fn from_document(doc: &CanvasDocument) -> Result<Self, String> {
        CanvasPage::from_document(doc).map(Self::new)
    }

    /// Make loads of `font` fail.
    #[must_use]
    pub fn with_missing_font(mut self, font: FontName) -> Self {
        self.missing_fonts.push(font);
        self
    }

    /// Sleep this long on every font load instead of just yielding.
    #[must_use]
    pub fn with_font_delay(mut self, delay: Duration) -> Self {
        self.font_delay = Some(delay);
        self
    }

    /// Behave like a host without node metadata.
    #[must_use]
    pub fn without_metadata(mut self) -> Self {
        self.metadata = false;
        self
    }

    pub fn page(&self) -> MutexGuard<'_, CanvasPage> {
        self.page.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn document(&self) -> CanvasDocument {
        self.page().to_document()
    }

    /// Fonts loaded so far, in load order (repeats included).
    pub fn loaded_fonts(&self) -> Vec<FontName> {
        self.fonts().clone()
    }

    /// Text nodes whose content is exactly `content`.
    pub fn nodes_with_text(&self, content: &str) -> Vec<CanvasNode> {
        self.page()
            .find_all(&|n| n.kind == NodeType::Text && n.characters.as_deref() == Some(content))
    }

    fn fonts(&self) -> MutexGuard<'_, Vec<FontName>> {
        self.loaded_fonts.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn default_font() -> FontName {
        FontName::new("Inter", "Regular")
    }
}

impl CanvasHost for MemoryHost {
    fn current_selection(&self) -> Vec<CanvasNode> {
        self.page().selected_nodes()
    }

    fn resolve_node(&self, id: NodeId) -> Option<CanvasNode> {
        self.page().snapshot(id)
    }

    async fn load_font(&self, font: &FontName) -> Result<(), String> {
        match self.font_delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }
        if self.missing_fonts.contains(font) {
            return Err(format!("font `{font}` is not installed"));
        }
        self.fonts().push(font.clone());
        Ok(())
    }

    fn create_text(&self) -> Result<NodeId, String> {
        let mut page = self.page();
        let id = page.mint_id();
        let mut node = CanvasNode::new(id, NodeType::Text);
        node.characters = Some(String::new());
        node.font_name = Some(Self::default_font());
        let root = page.root;
        page.add_node(root, node);
        Ok(id)
    }

    fn set_text_props(&self, id: NodeId, props: &TextProps) -> Result<(), String> {
        let mut page = self.page();
        let node = page
            .get_mut(id)
            .ok_or_else(|| format!("node `{id}` does not exist"))?;
        if node.kind != NodeType::Text {
            return Err(format!("node `{id}` is not a text node"));
        }
        if !self.fonts().contains(&props.font) {
            return Err(format!(
                "font `{}` must be loaded before editing `{id}`",
                props.font
            ));
        }
        let glyphs = props.characters.chars().count().max(1) as f32;
        node.font_name = Some(props.font.clone());
        node.characters = Some(props.characters.clone());
        node.bounds = Some(Bounds {
            x: props.x,
            y: props.y,
            width: props.font_size * glyphs,
            height: props.font_size,
        });
        Ok(())
    }

    /// `create_text` already places nodes directly under the page.
    fn append_to_current_page(&self, id: NodeId) -> Result<(), String> {
        match self.page().index_of(id) {
            Some(_) => Ok(()),
            None => Err(format!("node `{id}` does not exist")),
        }
    }

    fn find_text_nodes(&self, predicate: &dyn Fn(&CanvasNode) -> bool) -> Vec<CanvasNode> {
        self.page()
            .find_all(&|n| n.kind == NodeType::Text && predicate(n))
    }

    fn remove(&self, id: NodeId) -> bool {
        self.page().remove(id)
    }

    fn set_marker_tag(&self, id: NodeId, tag: &str) -> bool {
        if !self.metadata {
            return false;
        }
        match self.page().get_mut(id) {
            Some(node) => {
                node.plugin_data
                    .insert(MARKER_TAG_KEY.to_string(), tag.to_string());
                true
            }
            None => false,
        }
    }

    fn marker_tag(&self, id: NodeId) -> Option<String> {
        if !self.metadata {
            return None;
        }
        self.page()
            .get(id)
            .and_then(|node| node.plugin_data.get(MARKER_TAG_KEY).cloned())
    }

    fn supports_metadata(&self) -> bool {
        self.metadata
    }
}

/// UI channel that records every posted message.
#[derive(Debug, Default)]
pub struct RecordingUi {
    messages: Mutex<Vec<PluginMessage>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<PluginMessage> {
        self.lock().clone()
    }

    /// Drain recorded messages.
    pub fn take(&self) -> Vec<PluginMessage> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PluginMessage>> {
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl UiChannel for RecordingUi {
    fn post(&self, message: PluginMessage) {
        log::debug!("ui ← {}", message.to_json());
        self.lock().push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> MemoryHost {
        let doc = CanvasDocument {
            selection: vec![NodeId::intern("mh_note")],
            nodes: vec![CanvasNode::sticky("mh_note", "楽").with_bounds(0.0, 0.0, 100.0, 100.0)],
        };
        MemoryHost::from_document(&doc).unwrap()
    }

    #[tokio::test]
    async fn writing_text_requires_loaded_font() {
        let host = host();
        let id = host.create_text().unwrap();
        let props = TextProps {
            characters: "😊".into(),
            font: FontName::new("Inter", "Regular"),
            font_size: 24.0,
            x: 1.0,
            y: 2.0,
        };
        assert!(host.set_text_props(id, &props).is_err());

        host.load_font(&FontName::new("Inter", "Regular")).await.unwrap();
        host.set_text_props(id, &props).unwrap();
        let node = host.resolve_node(id).unwrap();
        assert_eq!(node.characters.as_deref(), Some("😊"));
        assert_eq!(node.bounds.map(|b| (b.x, b.y)), Some((1.0, 2.0)));
    }

    #[tokio::test]
    async fn missing_font_fails_to_load() {
        let font = FontName::new("Nope", "Regular");
        let host = host().with_missing_font(font.clone());
        assert!(host.load_font(&font).await.is_err());
        assert!(host.loaded_fonts().is_empty());
    }

    #[test]
    fn tags_need_metadata_support() {
        let tagged = host();
        let note = NodeId::intern("mh_note");
        assert!(tagged.set_marker_tag(note, "positive"));
        assert_eq!(tagged.marker_tag(note).as_deref(), Some("positive"));

        let bare = host().without_metadata();
        assert!(!bare.set_marker_tag(note, "positive"));
        assert_eq!(bare.marker_tag(note), None);
    }

    #[test]
    fn tags_survive_the_document_round_trip() {
        let host = host();
        let note = NodeId::intern("mh_note");
        host.set_marker_tag(note, "negative");

        let json = serde_json::to_string(&host.document()).unwrap();
        assert!(json.contains(r#""pluginData":{"emotion-marker":"negative"}"#));

        let doc: CanvasDocument = serde_json::from_str(&json).unwrap();
        let reloaded = MemoryHost::from_document(&doc).unwrap();
        assert_eq!(reloaded.marker_tag(note).as_deref(), Some("negative"));
    }

    #[test]
    fn recording_ui_drains() {
        let ui = RecordingUi::new();
        ui.post(PluginMessage::Canceled);
        assert_eq!(ui.take(), vec![PluginMessage::Canceled]);
        assert!(ui.messages().is_empty());
    }
}
