//! `CanvasHost` and `UiChannel` over the Figma plugin API.
//!
//! All access goes through `js_sys::Reflect` on the `figma` global, so the
//! crate needs no generated bindings for the plugin typings.

use emo_core::id::NodeId;
use emo_core::marker::MARKER_TAG_KEY;
use emo_core::model::{Bounds, CanvasNode, FontName, NodeType};
use emo_engine::{CanvasHost, PluginMessage, TextProps, UiChannel};
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

// ─── Reflect helpers ────────────────────────────────────────────────────

fn figma() -> Result<JsValue, String> {
    let api = get(&js_sys::global(), "figma")?;
    if api.is_undefined() || api.is_null() {
        return Err("figma global is not available".into());
    }
    Ok(api)
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, String> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(js_err)
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), String> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_err)
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, String> {
    let f: Function = get(target, method)?
        .dyn_into()
        .map_err(|_| format!("{method} is not a function"))?;
    let args: Array = args.iter().collect();
    Reflect::apply(&f, target, &args).map_err(js_err)
}

fn js_err(e: JsValue) -> String {
    e.as_string()
        .or_else(|| {
            e.dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{e:?}"))
}

fn current_page() -> Result<JsValue, String> {
    get(&figma()?, "currentPage")
}

fn node_by_id(id: NodeId) -> Option<JsValue> {
    let api = figma().ok()?;
    let node = call(&api, "getNodeById", &[JsValue::from_str(id.as_str())]).ok()?;
    (!node.is_null() && !node.is_undefined()).then_some(node)
}

fn string_prop(js: &JsValue, key: &str) -> Option<String> {
    get(js, key).ok()?.as_string()
}

fn number_prop(js: &JsValue, key: &str) -> Option<f32> {
    get(js, key).ok()?.as_f64().map(|v| v as f32)
}

// ─── Node snapshots ─────────────────────────────────────────────────────

/// `fontName` is the `figma.mixed` symbol when a text node mixes fonts;
/// anything without string `family`/`style` reads as `None`.
fn read_font(js: &JsValue) -> Option<FontName> {
    let font = get(js, "fontName").ok()?;
    if !font.is_object() {
        return None;
    }
    Some(FontName::new(
        string_prop(&font, "family")?,
        string_prop(&font, "style")?,
    ))
}

fn read_bounds(js: &JsValue) -> Option<Bounds> {
    let b = get(js, "absoluteBoundingBox").ok()?;
    if !b.is_object() {
        return None;
    }
    Some(Bounds {
        x: number_prop(&b, "x")?,
        y: number_prop(&b, "y")?,
        width: number_prop(&b, "width")?,
        height: number_prop(&b, "height")?,
    })
}

/// How much of a Figma node to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Read {
    /// Identity, kind, font and bounds, recursing into children. `TEXT`
    /// characters stay unread until the node's font has been loaded.
    Outline,
    /// A single node including its content.
    Node,
}

fn read_node(js: &JsValue, read: Read) -> Option<CanvasNode> {
    let id = string_prop(js, "id")?;
    let kind = NodeType::parse(&string_prop(js, "type")?);
    let mut node = CanvasNode::new(NodeId::intern(&id), kind);

    match node.kind {
        NodeType::Text => {
            node.font_name = read_font(js);
            if read == Read::Node {
                node.characters = string_prop(js, "characters");
            }
        }
        NodeType::Sticky => {
            node.text = get(js, "text")
                .ok()
                .and_then(|t| string_prop(&t, "characters"));
        }
        _ => {}
    }
    node.bounds = read_bounds(js);

    if read == Read::Outline
        && node.kind.is_container()
        && let Ok(children) = get(js, "children")
        && Array::is_array(&children)
    {
        node.children = Array::from(&children)
            .iter()
            .filter_map(|child| read_node(&child, Read::Outline))
            .collect();
    }
    Some(node)
}

fn font_object(font: &FontName) -> JsValue {
    let obj = js_sys::Object::new();
    // Plain object writes cannot fail.
    let _ = Reflect::set(&obj, &"family".into(), &JsValue::from_str(&font.family));
    let _ = Reflect::set(&obj, &"style".into(), &JsValue::from_str(&font.style));
    obj.into()
}

// ─── Host ───────────────────────────────────────────────────────────────

/// Figma-backed canvas host. Stateless; every call reads live document state.
#[derive(Debug, Default)]
pub struct FigmaHost;

impl CanvasHost for FigmaHost {
    fn current_selection(&self) -> Vec<CanvasNode> {
        let selection = match current_page().and_then(|page| get(&page, "selection")) {
            Ok(s) if Array::is_array(&s) => Array::from(&s),
            Ok(_) => return Vec::new(),
            Err(e) => {
                log::error!("reading selection: {e}");
                return Vec::new();
            }
        };
        selection
            .iter()
            .filter_map(|node| read_node(&node, Read::Outline))
            .collect()
    }

    fn resolve_node(&self, id: NodeId) -> Option<CanvasNode> {
        node_by_id(id).and_then(|node| read_node(&node, Read::Node))
    }

    async fn load_font(&self, font: &FontName) -> Result<(), String> {
        let promise = call(&figma()?, "loadFontAsync", &[font_object(font)])?;
        let promise: js_sys::Promise = promise
            .dyn_into()
            .map_err(|_| "loadFontAsync did not return a promise".to_string())?;
        JsFuture::from(promise).await.map(|_| ()).map_err(js_err)
    }

    fn create_text(&self) -> Result<NodeId, String> {
        let node = call(&figma()?, "createText", &[])?;
        string_prop(&node, "id")
            .map(|id| NodeId::intern(&id))
            .ok_or_else(|| "created text node has no id".to_string())
    }

    fn set_text_props(&self, id: NodeId, props: &TextProps) -> Result<(), String> {
        let node = node_by_id(id).ok_or_else(|| format!("node {id} not found"))?;
        // fontName first: characters can only be written with a loaded font.
        set(&node, "fontName", &font_object(&props.font))?;
        set(&node, "characters", &JsValue::from_str(&props.characters))?;
        set(&node, "fontSize", &JsValue::from_f64(props.font_size.into()))?;
        set(&node, "x", &JsValue::from_f64(props.x.into()))?;
        set(&node, "y", &JsValue::from_f64(props.y.into()))?;
        Ok(())
    }

    fn append_to_current_page(&self, id: NodeId) -> Result<(), String> {
        let node = node_by_id(id).ok_or_else(|| format!("node {id} not found"))?;
        call(&current_page()?, "appendChild", &[node]).map(|_| ())
    }

    fn find_text_nodes(&self, predicate: &dyn Fn(&CanvasNode) -> bool) -> Vec<CanvasNode> {
        let criteria = js_sys::Object::new();
        let types = Array::of1(&JsValue::from_str("TEXT"));
        // Plain object writes cannot fail.
        let _ = Reflect::set(&criteria, &"types".into(), &types);

        let found = current_page()
            .and_then(|page| call(&page, "findAllWithCriteria", &[criteria.into()]));
        let found = match found {
            Ok(found) if Array::is_array(&found) => Array::from(&found),
            Ok(_) => return Vec::new(),
            Err(e) => {
                log::error!("findAllWithCriteria: {e}");
                return Vec::new();
            }
        };
        found
            .iter()
            .filter_map(|node| read_node(&node, Read::Node))
            .filter(|node| predicate(node))
            .collect()
    }

    fn remove(&self, id: NodeId) -> bool {
        let Some(node) = node_by_id(id) else {
            return false;
        };
        match call(&node, "remove", &[]) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("removing {id}: {e}");
                false
            }
        }
    }

    fn set_marker_tag(&self, id: NodeId, tag: &str) -> bool {
        let Some(node) = node_by_id(id) else {
            return false;
        };
        call(
            &node,
            "setPluginData",
            &[JsValue::from_str(MARKER_TAG_KEY), JsValue::from_str(tag)],
        )
        .is_ok()
    }

    fn marker_tag(&self, id: NodeId) -> Option<String> {
        let node = node_by_id(id)?;
        call(&node, "getPluginData", &[JsValue::from_str(MARKER_TAG_KEY)])
            .ok()?
            .as_string()
            .filter(|tag| !tag.is_empty())
    }

    fn supports_metadata(&self) -> bool {
        true
    }
}

// ─── UI channel ─────────────────────────────────────────────────────────

/// Posts notifications to the plugin iframe via `figma.ui.postMessage`.
#[derive(Debug, Default)]
pub struct FigmaUi;

impl UiChannel for FigmaUi {
    fn post(&self, message: PluginMessage) {
        let posted = figma()
            .and_then(|api| get(&api, "ui"))
            .and_then(|ui| {
                let payload = js_sys::JSON::parse(&message.to_json()).map_err(js_err)?;
                call(&ui, "postMessage", &[payload])
            });
        if let Err(e) = posted {
            log::error!("posting {message:?} to UI: {e}");
        }
    }
}
