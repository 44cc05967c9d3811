//! WASM bridge for the emotion marker plugin.
//!
//! Compiled via `wasm-pack build --target no-modules` and loaded as the Figma
//! plugin main thread. The JS shim forwards `figma.ui.onmessage` payloads to
//! [`EmotionPlugin::handle_message`]; notifications go back through
//! `figma.ui.postMessage`.

mod figma;

use emo_core::AnalysisConfig;
use emo_core::detect::detect;
use emo_core::id::NodeId;
use emo_core::summary::summarize;
use emo_engine::Plugin;
use figma::{FigmaHost, FigmaUi};
use js_sys::Promise;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

/// Plugin controller exposed to the JS shim.
///
/// Handlers run concurrently: a `cancel-analysis` message is served while an
/// earlier `analyze-emotions` promise is still suspended on a font load.
#[wasm_bindgen]
pub struct EmotionPlugin {
    inner: Rc<Plugin<FigmaHost, FigmaUi>>,
}

#[wasm_bindgen]
impl EmotionPlugin {
    /// Create the controller. `config` is an optional plain object with the
    /// same shape as the JSON analysis config.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<EmotionPlugin, JsValue> {
        runtime_setup();

        let config = if config.is_undefined() || config.is_null() {
            AnalysisConfig::default()
        } else {
            let json: String = js_sys::JSON::stringify(&config)?.into();
            AnalysisConfig::from_json(&json).map_err(|e| JsValue::from_str(&e))?
        };
        log::info!("emotion plugin ready (cleanup: {:?})", config.cleanup);

        Ok(Self {
            inner: Rc::new(Plugin::new(FigmaHost, FigmaUi, config)),
        })
    }

    /// Dispatch one UI message. The promise resolves once the handler has
    /// finished, including marker placement for an analysis.
    pub fn handle_message(&self, message: JsValue) -> Promise {
        let raw = match message.as_string() {
            Some(s) => Ok(s),
            None => js_sys::JSON::stringify(&message).map(String::from),
        };
        let plugin = Rc::clone(&self.inner);
        future_to_promise(async move {
            plugin.handle_json(&raw?).await;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Whether an analysis run currently holds the slot.
    pub fn is_running(&self) -> bool {
        self.inner.analyzer().is_busy()
    }
}

/// Detect lexicon words in a standalone string. Returns
/// `{"detections":[...],"count":{...}}`.
#[wasm_bindgen]
pub fn detect_json(text: &str, node_id: &str) -> String {
    let detections = detect(text, NodeId::intern(node_id));
    let count = summarize(&detections);
    serde_json::json!({
        "detections": detections.as_slice(),
        "count": count,
    })
    .to_string()
}

fn runtime_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("emotion plugin panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
