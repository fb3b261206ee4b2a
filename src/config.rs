//! Command line configuration
//!
//! Every option can also be set through an `ALGOSCOPE_*` environment
//! variable. Input overrides are read against the selected problem's input
//! schema, so `--input nums=1,2,3` becomes a sequence and `--input m=3` a
//! number.

use crate::error::ConfigError;
use crate::logging::LogFormat;
use crate::playback::clamp_speed;
use crate::registry::{registry, AlgorithmDescriptor, InputMap};
use crate::trace::value::Value;
use crate::trace::DEFAULT_TRACE_LIMIT;
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "algoscope",
    version,
    about = "Step through algorithms line by line in the terminal"
)]
pub struct Cli {
    /// Problem to open (see --list)
    #[arg(short, long, env = "ALGOSCOPE_PROBLEM")]
    pub problem: Option<String>,

    /// Override an input, e.g. `--input nums=2,7,11,15` or `--input matrix="1,1;1,0"`
    #[arg(short, long = "input", value_name = "KEY=VALUE")]
    pub inputs: Vec<String>,

    /// Autoplay interval in milliseconds
    #[arg(short, long, default_value_t = 800, env = "ALGOSCOPE_SPEED")]
    pub speed: u64,

    /// Maximum number of entries a single trace may hold
    #[arg(long, default_value_t = DEFAULT_TRACE_LIMIT, env = "ALGOSCOPE_MAX_STEPS")]
    pub max_steps: usize,

    /// Log level or filter directive (trace|debug|info|warn|error)
    #[arg(long, env = "ALGOSCOPE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format (compact|pretty|json)
    #[arg(long, default_value = "compact", env = "ALGOSCOPE_LOG_FORMAT")]
    pub log_format: String,

    /// Log file used while the terminal UI is running
    #[arg(long, env = "ALGOSCOPE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Print the problem catalog and exit
    #[arg(long)]
    pub list: bool,

    /// Print the trace as JSON and exit instead of starting the UI
    #[arg(long)]
    pub dump: bool,
}

/// What the binary should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Dump,
    Interactive,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub problem: &'static AlgorithmDescriptor,
    pub inputs: InputMap,
    pub speed: Duration,
    pub max_steps: usize,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let problem = match cli.problem.as_deref() {
            Some(id) => registry()
                .find(id)
                .ok_or_else(|| ConfigError::UnknownProblem { id: id.to_string() })?,
            None => registry().first().ok_or_else(|| ConfigError::UnknownProblem {
                id: "<none>".to_string(),
            })?,
        };

        let inputs = apply_overrides(problem, &cli.inputs)?;

        let log_format = LogFormat::from_str(&cli.log_format).map_err(|_| ConfigError::LogFormat {
            format: cli.log_format.clone(),
        })?;

        let mode = if cli.list {
            Mode::List
        } else if cli.dump {
            Mode::Dump
        } else {
            Mode::Interactive
        };

        Ok(Config {
            mode,
            problem,
            inputs,
            speed: clamp_speed(Duration::from_millis(cli.speed)),
            max_steps: cli.max_steps.max(1),
            log_level: cli.log_level,
            log_format,
            log_file: cli
                .log_file
                .unwrap_or_else(|| std::env::temp_dir().join("algoscope.log")),
        })
    }
}

/// Merge `KEY=VALUE` overrides over the problem's default inputs
pub fn apply_overrides(
    problem: &AlgorithmDescriptor,
    overrides: &[String],
) -> Result<InputMap, ConfigError> {
    let schema = problem.schema();
    let mut inputs = problem.inputs.clone();

    for text in overrides {
        let (key, raw) = text
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedOverride { text: text.clone() })?;
        let key = key.trim();
        let kind = schema.get(key).ok_or_else(|| ConfigError::UnknownInput {
            problem: problem.id.to_string(),
            key: key.to_string(),
        })?;
        inputs.insert(key.to_string(), Value::parse(raw, *kind)?);
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["algoscope"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_cli(cli(&[])).unwrap();
        assert_eq!(config.mode, Mode::Interactive);
        assert_eq!(config.problem.id, "two-sum");
        assert_eq!(config.inputs, config.problem.inputs);
        assert_eq!(config.speed, Duration::from_millis(800));
    }

    #[test]
    fn test_overrides_follow_schema() {
        let config = Config::from_cli(cli(&[
            "--problem",
            "set-matrix-zeroes",
            "--input",
            "matrix=0,1;1,1",
            "--dump",
        ]))
        .unwrap();
        assert_eq!(config.mode, Mode::Dump);
        assert_eq!(
            config.inputs.get("matrix"),
            Some(&Value::filled_matrix(&[vec![0, 1], vec![1, 1]]))
        );
    }

    #[test]
    fn test_unknown_problem_and_input() {
        assert!(matches!(
            Config::from_cli(cli(&["--problem", "nope"])),
            Err(ConfigError::UnknownProblem { .. })
        ));
        assert!(matches!(
            Config::from_cli(cli(&["--input", "k=1"])),
            Err(ConfigError::UnknownInput { .. })
        ));
        assert!(matches!(
            Config::from_cli(cli(&["--input", "target"])),
            Err(ConfigError::MalformedOverride { .. })
        ));
    }

    #[test]
    fn test_bad_value_and_format() {
        assert!(matches!(
            Config::from_cli(cli(&["--input", "target=abc"])),
            Err(ConfigError::Value(_))
        ));
        assert!(matches!(
            Config::from_cli(cli(&["--log-format", "xml"])),
            Err(ConfigError::LogFormat { .. })
        ));
    }
}
