//! In-memory canvas page.
//!
//! A tree of host-like nodes stored in a `StableDiGraph` (edges go
//! parent → child), plus the page's current selection. It backs the
//! in-memory host used by the CLI and the test suites, and round-trips
//! through [`CanvasDocument`] JSON.

use crate::id::NodeId;
use crate::model::{CanvasDocument, CanvasNode, NodeType};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct CanvasPage {
    /// The underlying containment tree. Stored nodes never carry
    /// `children`; containment lives in the edges.
    pub graph: StableDiGraph<CanvasNode, ()>,

    /// The page node itself.
    pub root: NodeIndex,

    /// Index from NodeId → NodeIndex for fast lookup.
    id_index: HashMap<NodeId, NodeIndex>,

    /// Selected node ids, in selection order.
    pub selection: Vec<NodeId>,
}

impl CanvasPage {
    /// Create an empty page.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let page_id = NodeId::intern("page");
        let root = graph.add_node(CanvasNode::new(page_id, NodeType::Other("PAGE".into())));

        let mut id_index = HashMap::new();
        id_index.insert(page_id, root);

        Self {
            graph,
            root,
            id_index,
            selection: Vec::new(),
        }
    }

    /// Build a page from a serialized document.
    ///
    /// # Errors
    /// Returns an error when a node id appears twice or a selected id does
    /// not exist on the page.
    pub fn from_document(doc: &CanvasDocument) -> Result<Self, String> {
        let mut page = Self::new();
        for node in &doc.nodes {
            page.insert_tree(page.root, node)?;
        }
        for &id in &doc.selection {
            if !page.id_index.contains_key(&id) {
                return Err(format!("selected node `{id}` is not on the page"));
            }
        }
        page.selection = doc.selection.clone();
        Ok(page)
    }

    /// Serialize the page back into a document.
    pub fn to_document(&self) -> CanvasDocument {
        CanvasDocument {
            selection: self.selection.clone(),
            nodes: self
                .children(self.root)
                .into_iter()
                .map(|idx| self.snapshot_at(idx))
                .collect(),
        }
    }

    /// Insert `node` and its subtree under `parent`.
    ///
    /// # Errors
    /// Returns an error if any id in the subtree is already on the page.
    pub fn insert_tree(
        &mut self,
        parent: NodeIndex,
        node: &CanvasNode,
    ) -> Result<NodeIndex, String> {
        if self.id_index.contains_key(&node.id) {
            return Err(format!("duplicate node id `{}`", node.id));
        }
        let mut flat = node.clone();
        let children = std::mem::take(&mut flat.children);
        let idx = self.add_node(parent, flat);
        for child in &children {
            self.insert_tree(idx, child)?;
        }
        Ok(idx)
    }

    /// Add a single childless node under `parent`. Returns the new index.
    pub fn add_node(&mut self, parent: NodeIndex, node: CanvasNode) -> NodeIndex {
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent, idx, ());
        self.id_index.insert(id, idx);
        idx
    }

    /// Remove a node and its whole subtree. Returns `false` if absent.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        if idx == self.root {
            return false;
        }
        let mut doomed = Vec::new();
        self.descendants(idx, &mut doomed);
        for victim in doomed {
            if let Some(removed) = self.graph.remove_node(victim) {
                self.id_index.remove(&removed.id);
                self.selection.retain(|s| *s != removed.id);
            }
        }
        true
    }

    /// Get the index for a NodeId.
    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn get(&self, id: NodeId) -> Option<&CanvasNode> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut CanvasNode> {
        self.index_of(id).map(|idx| &mut self.graph[idx])
    }

    /// Children of a node in insertion order.
    ///
    /// Sorted by `NodeIndex` so the order does not depend on how `petgraph`
    /// iterates its adjacency list.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    /// Deep snapshot of a node by id.
    pub fn snapshot(&self, id: NodeId) -> Option<CanvasNode> {
        self.index_of(id).map(|idx| self.snapshot_at(idx))
    }

    fn snapshot_at(&self, idx: NodeIndex) -> CanvasNode {
        let mut node = self.graph[idx].clone();
        node.children = self
            .children(idx)
            .into_iter()
            .map(|child| self.snapshot_at(child))
            .collect();
        node
    }

    /// Deep snapshots of the selected nodes, in selection order.
    pub fn selected_nodes(&self) -> Vec<CanvasNode> {
        self.selection
            .iter()
            .filter_map(|&id| self.snapshot(id))
            .collect()
    }

    /// Every node under the page (pre-order) satisfying `predicate`.
    ///
    /// Nodes are tested and returned as stored, without `children`; only
    /// matches are cloned.
    pub fn find_all(&self, predicate: &dyn Fn(&CanvasNode) -> bool) -> Vec<CanvasNode> {
        let mut all = Vec::new();
        self.descendants(self.root, &mut all);
        all.into_iter()
            .filter(|&idx| idx != self.root)
            .map(|idx| &self.graph[idx])
            .filter(|node| predicate(node))
            .cloned()
            .collect()
    }

    /// A fresh `"0:<n>"` id, `n` one past the highest local part on the page.
    /// Session `0` marks ids minted here rather than by a host.
    pub fn mint_id(&self) -> NodeId {
        let next = self
            .id_index
            .keys()
            .filter_map(NodeId::parts)
            .map(|(_, local)| local)
            .max()
            .map_or(1, |local| local.saturating_add(1));
        NodeId::from_parts(0, next)
    }

    /// Number of nodes on the page, excluding the page itself.
    pub fn len(&self) -> usize {
        self.graph.node_count() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `idx` and all of its descendants, pre-order.
    fn descendants(&self, idx: NodeIndex, out: &mut Vec<NodeIndex>) {
        out.push(idx);
        for child in self.children(idx) {
            self.descendants(child, out);
        }
    }
}

impl Default for CanvasPage {
    fn default() -> Self {
        Self::new()
    }
}
