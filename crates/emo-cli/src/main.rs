//! `emo`: run the emotion marker plugin against a JSON canvas document.
//!
//! The document is loaded into an in-memory canvas page; UI notifications
//! are printed to stdout as JSON lines and logs go to stderr (`RUST_LOG`).

mod args;
mod session;
mod ui;

use args::{Args, Command};
use emo_core::AnalysisConfig;
use emo_core::model::CanvasDocument;
use emo_engine::{MemoryHost, Plugin};
use std::path::Path;
use std::rc::Rc;
use ui::JsonLinesUi;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = match args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("emo error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), String> {
    let doc = load_document(&args.document)?;
    let config = match &args.config {
        Some(path) => AnalysisConfig::from_json(&read(path)?)?,
        None => AnalysisConfig::default(),
    };

    let mut host = MemoryHost::from_document(&doc)?;
    if let Some(delay) = args.font_delay {
        host = host.with_font_delay(delay);
    }
    let plugin = Rc::new(Plugin::new(host, JsonLinesUi::new(std::io::stdout()), config));

    match args.command {
        Command::Analyze => {
            let summary = plugin.analyze().await.map_err(|e| e.to_string())?;
            log::info!(
                "{} detections ({} positive, {} negative), {} markers placed",
                summary.detections.len(),
                summary.count.positive,
                summary.count.negative,
                summary.placement.placed
            );
        }
        Command::Clear => {
            plugin.clear();
        }
        Command::Session => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let dispatched = tokio::task::LocalSet::new()
                .run_until(session::run(Rc::clone(&plugin), stdin))
                .await
                .map_err(|e| format!("reading stdin: {e}"))?;
            log::info!("session ended after {dispatched} messages");
        }
    }

    if let Some(out) = &args.out {
        write_document(out, &plugin.host().document())?;
        log::info!("wrote {}", out.display());
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))
}

fn load_document(path: &Path) -> Result<CanvasDocument, String> {
    serde_json::from_str(&read(path)?).map_err(|e| format!("{}: {e}", path.display()))
}

fn write_document(path: &Path, doc: &CanvasDocument) -> Result<(), String> {
    let json = serde_json::to_string_pretty(doc).map_err(|e| e.to_string())?;
    std::fs::write(path, json + "\n").map_err(|e| format!("{}: {e}", path.display()))
}
