//! Text-node discovery over a selection forest.
//!
//! Walks the roots depth-first, pre-order. Text and sticky nodes become
//! [`TextUnit`]s; group-like containers are descended into; anything else is
//! skipped. Units hold no content: a text node's characters may only be read
//! once its font is loaded. The host hierarchy is an ownership tree, so plain recursion
//! without a visited set is enough.

use crate::model::{CanvasNode, Capability, TextUnit};

/// Collect every text-bearing node under `roots`, in pre-order.
#[must_use]
pub fn collect_text_units(roots: &[CanvasNode]) -> Vec<TextUnit> {
    let mut units = Vec::new();
    for root in roots {
        collect_node(root, &mut units);
    }
    units
}

fn collect_node(node: &CanvasNode, out: &mut Vec<TextUnit>) {
    match node.capability() {
        Capability::Text { font, .. } => out.push(TextUnit {
            node_id: node.id,
            font: font.cloned(),
            needs_font: true,
        }),
        Capability::Sticky(_) => out.push(TextUnit {
            node_id: node.id,
            font: None,
            needs_font: false,
        }),
        Capability::Container(children) => {
            for child in children {
                collect_node(child, out);
            }
        }
        Capability::Opaque => {
            log::trace!("collect: skipping {} node {}", node.kind, node.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeId;
    use crate::model::{FontName, NodeType};

    fn font() -> FontName {
        FontName::new("Inter", "Regular")
    }

    fn ids(units: &[TextUnit]) -> Vec<&str> {
        units.iter().map(|u| u.node_id.as_str()).collect()
    }

    #[test]
    fn flat_selection_keeps_order() {
        let roots = vec![
            CanvasNode::text("a", "one", font()),
            CanvasNode::sticky("b", "two"),
            CanvasNode::text("c", "three", font()),
        ];
        let units = collect_text_units(&roots);
        assert_eq!(ids(&units), ["a", "b", "c"]);
        assert!(units[0].needs_font);
        assert!(!units[1].needs_font);
    }

    #[test]
    fn container_children_come_before_next_sibling() {
        let roots = vec![
            CanvasNode::container(
                "frame",
                NodeType::Frame,
                vec![
                    CanvasNode::text("f1", "x", font()),
                    CanvasNode::container(
                        "inner",
                        NodeType::Group,
                        vec![CanvasNode::sticky("g1", "y")],
                    ),
                    CanvasNode::text("f2", "z", font()),
                ],
            ),
            CanvasNode::text("after", "w", font()),
        ];
        let units = collect_text_units(&roots);
        assert_eq!(ids(&units), ["f1", "g1", "f2", "after"]);
    }

    #[test]
    fn opaque_nodes_contribute_nothing() {
        let roots = vec![
            CanvasNode::new(NodeId::intern("rect"), NodeType::Other("RECTANGLE".into())),
            CanvasNode::container("empty_section", NodeType::Section, vec![]),
            CanvasNode::sticky("blank", ""),
        ];
        assert!(collect_text_units(&roots).is_empty());
    }

    #[test]
    fn text_nodes_inside_opaque_kinds_are_not_visited() {
        let mut shape = CanvasNode::new(NodeId::intern("shape"), NodeType::Other("VECTOR".into()));
        shape.children.push(CanvasNode::text("hidden", "嬉しい", font()));
        assert!(collect_text_units(&[shape]).is_empty());
    }
}
