//! UI channel printing each notification as one JSON line.

use emo_engine::{PluginMessage, UiChannel};
use std::io::Write;
use std::sync::{Mutex, MutexGuard};

pub struct JsonLinesUi<W> {
    out: Mutex<W>,
}

impl<W: Write> JsonLinesUi<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.out.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
impl JsonLinesUi<Vec<u8>> {
    /// Lines written so far.
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.lock())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl<W: Write> UiChannel for JsonLinesUi<W> {
    fn post(&self, message: PluginMessage) {
        let mut out = self.lock();
        if let Err(e) = writeln!(out, "{}", message.to_json()).and_then(|()| out.flush()) {
            log::error!("writing UI message: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emo_core::summary::EmotionCount;
    use pretty_assertions::assert_eq;

    #[test]
    fn one_message_per_line() {
        let ui = JsonLinesUi::new(Vec::new());
        ui.post(PluginMessage::Canceled);
        ui.post(PluginMessage::AnalysisComplete {
            count: EmotionCount {
                positive: 1,
                negative: 0,
            },
        });
        assert_eq!(
            ui.lines(),
            [
                r#"{"type":"canceled"}"#,
                r#"{"type":"analysis-complete","count":{"positive":1,"negative":0}}"#,
            ]
        );
    }
}
