//! Plugin dispatcher: routes UI requests to the analyzer, placer and cleaner
//! and posts the resulting notifications.
//!
//! Handlers take `&self` so a cancel or clear request can be served while an
//! analysis is suspended on a host call. A second analyze request during an
//! active run is rejected with an `error` notification.

use crate::analyzer::{ActiveRun, AnalyzeError, Analyzer};
use crate::cleaner::clear_markers;
use crate::host::{CanvasHost, UiChannel};
use crate::messages::{PluginMessage, UiRequest};
use crate::placer::{PlacementReport, place_markers};
use crate::run::RunState;
use emo_core::config::AnalysisConfig;
use emo_core::model::Detection;
use emo_core::summary::{EmotionCount, summarize};

/// Everything one finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub state: RunState,
    pub detections: Vec<Detection>,
    pub count: EmotionCount,
    pub placement: PlacementReport,
}

pub struct Plugin<H, U> {
    host: H,
    ui: U,
    analyzer: Analyzer,
    config: AnalysisConfig,
}

impl<H: CanvasHost, U: UiChannel> Plugin<H, U> {
    pub fn new(host: H, ui: U, config: AnalysisConfig) -> Self {
        Self {
            host,
            ui,
            analyzer: Analyzer::new(),
            config,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Dispatch one UI request.
    pub async fn handle(&self, request: UiRequest) {
        log::debug!("ui request: {request:?}");
        match request {
            UiRequest::AnalyzeEmotions => {
                // Failures were already reported to the UI.
                let _ = self.analyze().await;
            }
            UiRequest::CancelAnalysis => {
                self.cancel();
            }
            UiRequest::ClearEmojis => {
                self.clear();
            }
        }
    }

    /// Parse and dispatch a raw JSON request. Unknown messages are logged
    /// and dropped.
    pub async fn handle_json(&self, raw: &str) {
        match UiRequest::from_json(raw) {
            Ok(request) => self.handle(request).await,
            Err(e) => log::warn!("{e}"),
        }
    }

    /// Run a full analysis: scan, place markers, report.
    ///
    /// # Errors
    /// Returns why the run did not start; the UI has already received an
    /// `error` notification.
    pub async fn analyze(&self) -> Result<RunSummary, AnalyzeError> {
        let run = self.start_analysis()?;
        Ok(self.complete_analysis(run).await)
    }

    /// Snapshot the selection and enter `Scanning`, reporting start failures
    /// to the UI.
    ///
    /// # Errors
    /// See [`Analyzer::begin`].
    pub fn start_analysis(&self) -> Result<ActiveRun<'_>, AnalyzeError> {
        self.analyzer.begin(&self.host).inspect_err(|e| {
            let message = match e {
                AnalyzeError::EmptySelection => self.config.empty_selection_message.clone(),
                AnalyzeError::Busy => self.config.busy_message.clone(),
            };
            self.ui.post(PluginMessage::Error { message });
        })
    }

    /// Scan, place markers for whatever was detected, and report. A
    /// cancelled run still places and reports what it found before the
    /// cancellation was observed.
    pub async fn complete_analysis(&self, mut run: ActiveRun<'_>) -> RunSummary {
        let scan = run.scan(&self.host).await;
        let placement = place_markers(&self.host, &scan.detections, &self.config.marker).await;
        let count = summarize(&scan.detections);

        if scan.state == RunState::Cancelled {
            self.ui.post(PluginMessage::Canceled);
        }
        self.ui.post(PluginMessage::AnalysisComplete { count });
        drop(run);

        RunSummary {
            state: scan.state,
            detections: scan.detections,
            count,
            placement,
        }
    }

    /// Flag the scanning run for cancellation. No-op when nothing is scanning.
    pub fn cancel(&self) -> bool {
        self.analyzer.cancel()
    }

    /// Remove every marker on the current page and notify the UI.
    pub fn clear(&self) -> usize {
        let removed = clear_markers(&self.host, self.config.cleanup);
        self.ui.post(PluginMessage::EmojisCleared { removed });
        removed
    }
}
