//! Canvas node model as seen by the analyzer.
//!
//! `CanvasNode` is a read-only snapshot of a host node: its id, kind tag,
//! optional text, optional children, and optional bounding box. The analyzer
//! never inspects kind-specific fields directly; it goes through
//! [`CanvasNode::capability`], which folds the host's node zoo into the three
//! shapes the collector cares about (text-bearing, container, opaque).

use crate::id::NodeId;
use crate::lexicon::Category;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// ─── Node kind ───────────────────────────────────────────────────────────

/// Host node type tag (`"TEXT"`, `"STICKY"`, `"FRAME"`, …).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeType {
    Text,
    Sticky,
    Group,
    Section,
    Frame,
    Component,
    Instance,
    /// Any other host type (rectangles, vectors, connectors, …).
    Other(String),
}

impl NodeType {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "TEXT" => NodeType::Text,
            "STICKY" => NodeType::Sticky,
            "GROUP" => NodeType::Group,
            "SECTION" => NodeType::Section,
            "FRAME" => NodeType::Frame,
            "COMPONENT" => NodeType::Component,
            "INSTANCE" => NodeType::Instance,
            other => NodeType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Text => "TEXT",
            NodeType::Sticky => "STICKY",
            NodeType::Group => "GROUP",
            NodeType::Section => "SECTION",
            NodeType::Frame => "FRAME",
            NodeType::Component => "COMPONENT",
            NodeType::Instance => "INSTANCE",
            NodeType::Other(tag) => tag,
        }
    }

    /// Group-like containers the collector descends into.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeType::Group
                | NodeType::Section
                | NodeType::Frame
                | NodeType::Component
                | NodeType::Instance
        )
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NodeType::parse(&s))
    }
}

// ─── Font / Geometry ─────────────────────────────────────────────────────

/// Host font reference; must be loaded before text content is read or written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

/// Absolute bounding box of a node on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ─── Canvas node ─────────────────────────────────────────────────────────

/// Read-only snapshot of one host node and (for containers) its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasNode {
    pub id: NodeId,

    #[serde(rename = "type")]
    pub kind: NodeType,

    /// Content of a `TEXT` node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,

    /// Font of a `TEXT` node. `None` when mixed or unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<FontName>,

    /// Content of a `STICKY` note's text sublayer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CanvasNode>,

    #[serde(
        default,
        rename = "absoluteBoundingBox",
        skip_serializing_if = "Option::is_none"
    )]
    pub bounds: Option<Bounds>,

    /// Host-side key/value metadata (Figma `pluginData`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plugin_data: BTreeMap<String, String>,
}

/// What a node offers to the text collector.
#[derive(Debug, Clone, Copy)]
pub enum Capability<'a> {
    /// A text node; its content is readable once `font` is loaded.
    Text {
        content: &'a str,
        font: Option<&'a FontName>,
    },
    /// A sticky note with non-empty text; no font step needed.
    Sticky(&'a str),
    /// A group-like node with at least one child.
    Container(&'a [CanvasNode]),
    /// Contributes nothing.
    Opaque,
}

impl CanvasNode {
    pub fn new(id: NodeId, kind: NodeType) -> Self {
        Self {
            id,
            kind,
            characters: None,
            font_name: None,
            text: None,
            children: Vec::new(),
            bounds: None,
            plugin_data: BTreeMap::new(),
        }
    }

    /// A `TEXT` node with the given content and font.
    pub fn text(id: &str, characters: &str, font: FontName) -> Self {
        let mut node = Self::new(NodeId::intern(id), NodeType::Text);
        node.characters = Some(characters.to_string());
        node.font_name = Some(font);
        node
    }

    /// A `STICKY` note with the given text.
    pub fn sticky(id: &str, text: &str) -> Self {
        let mut node = Self::new(NodeId::intern(id), NodeType::Sticky);
        node.text = Some(text.to_string());
        node
    }

    /// A container of `kind` holding `children`.
    pub fn container(id: &str, kind: NodeType, children: Vec<CanvasNode>) -> Self {
        let mut node = Self::new(NodeId::intern(id), kind);
        node.children = children;
        node
    }

    #[must_use]
    pub fn with_bounds(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.bounds = Some(Bounds {
            x,
            y,
            width,
            height,
        });
        self
    }

    pub fn capability(&self) -> Capability<'_> {
        match self.kind {
            NodeType::Text => Capability::Text {
                content: self.characters.as_deref().unwrap_or(""),
                font: self.font_name.as_ref(),
            },
            NodeType::Sticky => match self.text.as_deref() {
                Some(text) if !text.is_empty() => Capability::Sticky(text),
                _ => Capability::Opaque,
            },
            ref kind if kind.is_container() && !self.children.is_empty() => {
                Capability::Container(&self.children)
            }
            _ => Capability::Opaque,
        }
    }
}

// ─── Analysis records ────────────────────────────────────────────────────

/// One text-bearing node extracted from the selection.
///
/// Carries identity only. The content is read from the host at scan time,
/// after the font step.
#[derive(Debug, Clone, PartialEq)]
pub struct TextUnit {
    pub node_id: NodeId,
    /// Font to resolve before reading the content; `None` for sticky notes
    /// or text nodes with mixed fonts.
    pub font: Option<FontName>,
    /// `true` for `TEXT` nodes, which must pass the font step.
    pub needs_font: bool,
}

/// One lexicon match inside a text unit.
///
/// Offsets are UTF-16 code units into the unit's text, `end = start + word length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub word: &'static str,
    #[serde(rename = "type")]
    pub category: Category,
    pub node_id: NodeId,
    pub start_index: usize,
    pub end_index: usize,
}

// ─── Documents ───────────────────────────────────────────────────────────

/// A serialized canvas page: node forest plus the ids currently selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    #[serde(default)]
    pub selection: Vec<NodeId>,
    #[serde(default)]
    pub nodes: Vec<CanvasNode>,
}
