//! Interactive session: UI messages arrive one JSON object per line and each
//! is dispatched as its own local task, so a cancel or a second analyze can
//! reach the plugin while an earlier analysis is suspended on a font load.
//!
//! Must run inside a [`tokio::task::LocalSet`].

use emo_engine::{CanvasHost, Plugin, UiChannel};
use std::rc::Rc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Dispatch every line of `input`, then wait for all handlers. Returns the
/// number of messages dispatched.
pub async fn run<H, U, R>(plugin: Rc<Plugin<H, U>>, input: R) -> std::io::Result<usize>
where
    H: CanvasHost + 'static,
    U: UiChannel + 'static,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut handlers = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let raw = line.trim().to_string();
        if raw.is_empty() {
            continue;
        }
        let plugin = Rc::clone(&plugin);
        handlers.push(tokio::task::spawn_local(async move {
            plugin.handle_json(&raw).await;
        }));
    }

    let dispatched = handlers.len();
    for handler in handlers {
        if let Err(e) = handler.await {
            log::error!("message handler failed: {e}");
        }
    }
    Ok(dispatched)
}
