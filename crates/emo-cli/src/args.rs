//! Command-line parsing.

use std::path::PathBuf;
use std::time::Duration;

pub const USAGE: &str = "\
usage: emo <command> <document.json> [options]

commands:
  analyze   detect emotion words in the selection and place markers
  clear     remove every marker from the page
  session   read UI messages (one JSON object per line) from stdin

options:
  --config <file>        analysis config (JSON)
  --out <file>           write the resulting document here
  --font-delay-ms <n>    simulated font load latency";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Analyze,
    Clear,
    Session,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub command: Command,
    pub document: PathBuf,
    pub config: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub font_delay: Option<Duration>,
}

/// Parse arguments (without the program name).
pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut args = args.into_iter();

    let command = match args.next().as_deref() {
        Some("analyze") => Command::Analyze,
        Some("clear") => Command::Clear,
        Some("session") => Command::Session,
        Some("-h" | "--help") | None => return Err(USAGE.to_string()),
        Some(other) => return Err(format!("unknown command '{other}'\n\n{USAGE}")),
    };

    let mut document = None;
    let mut config = None;
    let mut out = None;
    let mut font_delay = None;

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("{flag} expects a value"))
        };
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(value("--config")?)),
            "--out" => out = Some(PathBuf::from(value("--out")?)),
            "--font-delay-ms" => {
                let raw = value("--font-delay-ms")?;
                let ms: u64 = raw
                    .parse()
                    .map_err(|_| format!("--font-delay-ms: '{raw}' is not a number"))?;
                font_delay = Some(Duration::from_millis(ms));
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
            path if document.is_none() => document = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument '{extra}'")),
        }
    }

    Ok(Args {
        command,
        document: document.ok_or_else(|| format!("missing document path\n\n{USAGE}"))?,
        config,
        out,
        font_delay,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn argv(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn parse_analyze_with_options() {
        let args = parse(argv("analyze board.json --config cfg.json --out out.json")).unwrap();
        assert_eq!(
            args,
            Args {
                command: Command::Analyze,
                document: "board.json".into(),
                config: Some("cfg.json".into()),
                out: Some("out.json".into()),
                font_delay: None,
            }
        );
    }

    #[test]
    fn parse_session_font_delay() {
        let args = parse(argv("session board.json --font-delay-ms 25")).unwrap();
        assert_eq!(args.command, Command::Session);
        assert_eq!(args.font_delay, Some(Duration::from_millis(25)));
    }

    #[test]
    fn parse_errors() {
        assert!(parse(argv("")).is_err());
        assert!(parse(argv("paint board.json")).is_err());
        assert!(parse(argv("clear")).is_err());
        assert!(parse(argv("clear a.json b.json")).is_err());
        assert!(parse(argv("clear a.json --out")).is_err());
        assert!(parse(argv("session a.json --font-delay-ms soon")).is_err());
        assert!(parse(argv("analyze a.json --verbose")).is_err());
    }
}
