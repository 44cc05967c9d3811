//! Integration tests: document JSON → page → collected units → detections.
//!
//! Exercises the full `emo-core` pipeline without a host.

use emo_core::id::NodeId;
use emo_core::lexicon::Category;
use emo_core::model::{CanvasDocument, Capability};
use emo_core::page::CanvasPage;
use emo_core::{collect_text_units, detect, summarize};
use pretty_assertions::assert_eq;

fn page() -> CanvasPage {
    let doc: CanvasDocument = serde_json::from_str(include_str!("fixtures/board.json")).unwrap();
    CanvasPage::from_document(&doc).unwrap()
}

fn content(page: &CanvasPage, id: NodeId) -> String {
    match page.get(id).unwrap().capability() {
        Capability::Text { content, .. } => content.to_string(),
        Capability::Sticky(text) => text.to_string(),
        other => panic!("{id} holds no text: {other:?}"),
    }
}

#[test]
fn selection_collects_in_preorder() {
    let page = page();
    let units = collect_text_units(&page.selected_nodes());
    let ids: Vec<_> = units.iter().map(|u| u.node_id.as_str()).collect();
    // board_blank_sticky is empty and board_empty_group holds no text.
    assert_eq!(
        ids,
        ["board_title", "board_sticky_1", "board_sticky_2", "board_loose"]
    );
    let fonts: Vec<_> = units.iter().map(|u| u.needs_font).collect();
    assert_eq!(fonts, [true, false, false, true]);
}

#[test]
fn unselected_nodes_are_ignored() {
    let mut page = page();
    page.selection = vec![NodeId::intern("board_loose")];
    let units = collect_text_units(&page.selected_nodes());
    assert_eq!(units.len(), 1);
    assert_eq!(content(&page, units[0].node_id), "嬉しい嬉しい");
}

#[test]
fn detections_aggregate_across_units() {
    let page = page();
    let mut all = Vec::new();
    for unit in collect_text_units(&page.selected_nodes()) {
        all.extend(detect(&content(&page, unit.node_id), unit.node_id));
    }
    let words: Vec<_> = all.iter().map(|d| (d.word, d.category)).collect();
    assert_eq!(
        words,
        [
            ("安心", Category::Positive),
            ("楽", Category::Positive),
            ("手間", Category::Negative),
            ("心配", Category::Negative),
            ("嬉しい", Category::Positive),
            ("嬉しい", Category::Positive),
        ]
    );
    let count = summarize(&all);
    assert_eq!((count.positive, count.negative), (4, 2));
}

#[test]
fn detection_json_shape() {
    let found = detect("手間", NodeId::intern("json_node"));
    let json = serde_json::to_string(&found[0]).unwrap();
    assert_eq!(
        json,
        r#"{"word":"手間","type":"negative","nodeId":"json_node","startIndex":0,"endIndex":2}"#
    );
}
