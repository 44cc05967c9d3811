//! Integration tests: marker cleanup policies and idempotence.

use emo_core::config::CleanupPolicy;
use emo_core::id::NodeId;
use emo_core::marker::{NEGATIVE_GLYPH, POSITIVE_GLYPH};
use emo_core::model::*;
use emo_core::AnalysisConfig;
use emo_engine::{MemoryHost, Plugin, PluginMessage, RecordingUi, UiRequest};
use pretty_assertions::assert_eq;

fn doc() -> CanvasDocument {
    let font = FontName::new("Inter", "Regular");
    CanvasDocument {
        selection: vec![NodeId::intern("cl_text")],
        nodes: vec![
            CanvasNode::text("cl_text", "楽だけど大変", font.clone()).with_bounds(0.0, 0.0, 100.0, 20.0),
            // A user-authored node that happens to hold a marker glyph.
            CanvasNode::text("cl_user_glyph", POSITIVE_GLYPH, font.clone()),
            // Glyph plus other text is never a marker.
            CanvasNode::text("cl_user_caption", "😊 great", font),
            CanvasNode::sticky("cl_sticky_glyph", NEGATIVE_GLYPH),
        ],
    }
}

fn plugin(host: MemoryHost, cleanup: CleanupPolicy) -> Plugin<MemoryHost, RecordingUi> {
    let config = AnalysisConfig {
        cleanup,
        ..AnalysisConfig::default()
    };
    Plugin::new(host, RecordingUi::new(), config)
}

#[tokio::test]
async fn clear_twice_is_idempotent() {
    let plugin = plugin(MemoryHost::from_document(&doc()).unwrap(), CleanupPolicy::Glyph);
    plugin.analyze().await.unwrap();
    plugin.ui().take();

    plugin.handle(UiRequest::ClearEmojis).await;
    plugin.handle(UiRequest::ClearEmojis).await;

    assert_eq!(
        plugin.ui().messages(),
        vec![
            // Two markers plus the user's lone glyph text node.
            PluginMessage::EmojisCleared { removed: 3 },
            PluginMessage::EmojisCleared { removed: 0 },
        ]
    );
    let page = plugin.host().page();
    assert!(page.get(NodeId::intern("cl_text")).is_some());
    assert!(page.get(NodeId::intern("cl_user_caption")).is_some());
    assert!(page.get(NodeId::intern("cl_sticky_glyph")).is_some());
    assert!(page.get(NodeId::intern("cl_user_glyph")).is_none());
}

#[tokio::test]
async fn clear_on_empty_page_is_a_noop() {
    let plugin = plugin(
        MemoryHost::from_document(&CanvasDocument::default()).unwrap(),
        CleanupPolicy::Glyph,
    );
    assert_eq!(plugin.clear(), 0);
    assert_eq!(
        plugin.ui().messages(),
        vec![PluginMessage::EmojisCleared { removed: 0 }]
    );
}

#[tokio::test]
async fn tagged_policy_spares_user_glyphs() {
    let plugin = plugin(MemoryHost::from_document(&doc()).unwrap(), CleanupPolicy::Tagged);
    plugin.analyze().await.unwrap();

    assert_eq!(plugin.clear(), 2);
    assert!(
        plugin
            .host()
            .page()
            .get(NodeId::intern("cl_user_glyph"))
            .is_some()
    );
    assert_eq!(plugin.host().nodes_with_text(NEGATIVE_GLYPH).len(), 0);
}

#[tokio::test]
async fn tagged_policy_falls_back_without_metadata() {
    let host = MemoryHost::from_document(&doc()).unwrap().without_metadata();
    let plugin = plugin(host, CleanupPolicy::Tagged);
    plugin.analyze().await.unwrap();

    assert_eq!(plugin.clear(), 3);
}

#[tokio::test]
async fn clear_removes_markers_from_earlier_runs() {
    let plugin = plugin(MemoryHost::from_document(&doc()).unwrap(), CleanupPolicy::Tagged);
    plugin.analyze().await.unwrap();
    plugin.analyze().await.unwrap();
    assert_eq!(plugin.host().nodes_with_text(POSITIVE_GLYPH).len(), 3);

    assert_eq!(plugin.clear(), 4);
    assert_eq!(plugin.host().nodes_with_text(POSITIVE_GLYPH).len(), 1);
}
