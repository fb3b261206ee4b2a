//! Logging setup
//!
//! Structured logging goes through `tracing`. While the terminal UI is up it
//! owns stdout and stderr, so events are written to a log file instead; the
//! non-interactive modes log to stderr.
//!
//! # Filtering
//!
//! The level comes from `--log-level`, then `ALGOSCOPE_LOG_LEVEL`, then
//! `RUST_LOG`, and defaults to `info`. Any `EnvFilter` directive works:
//!
//! ```bash
//! ALGOSCOPE_LOG_LEVEL="info,algoscope::playback=trace" algoscope -p unique-paths
//! ```

use crate::error::ConfigError;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::str::FromStr;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format
    Compact,
    /// Pretty multi-line format
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Where log events are written
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
}

fn resolve_filter(level: Option<&str>) -> EnvFilter {
    let level = level
        .map(str::to_string)
        .or_else(|| std::env::var("ALGOSCOPE_LOG_LEVEL").ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    if level == "off" {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Install the global subscriber
pub fn init_logging(
    level: Option<&str>,
    format: LogFormat,
    target: LogTarget<'_>,
) -> Result<(), ConfigError> {
    let filter = resolve_filter(level);

    let (writer, ansi) = match target {
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (fmt::writer::BoxMakeWriter::new(file), false)
        }
        LogTarget::Stderr => (fmt::writer::BoxMakeWriter::new(io::stderr), true),
    };

    let layer = fmt::Layer::default()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_level(true);
    let layer = match format {
        LogFormat::Compact => layer
            .with_target(false)
            .with_span_events(FmtSpan::NONE)
            .compact()
            .boxed(),
        LogFormat::Pretty => layer
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .boxed(),
        LogFormat::Json => layer.with_target(true).json().boxed(),
    };

    Registry::default()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| ConfigError::Io {
            source: io::Error::new(io::ErrorKind::Other, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("invalid").is_err());
    }
}
