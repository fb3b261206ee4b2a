//! Error types
//!
//! Nothing here is fatal to playback. [`ShapeMismatch`] and [`GenerateError`]
//! are absorbed by the trace controller and turned into an empty trace;
//! [`ValueParseError`] and [`ConfigError`] only surface while reading the
//! command line.

use crate::trace::value::ValueKind;
use thiserror::Error;

/// Inputs that do not (yet) fit the selected algorithm
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeMismatch {
    #[error("input `{key}` is required but missing")]
    MissingKey { key: String },

    #[error("input `{key}` should be a {expected}, got a {got}")]
    KindMismatch {
        key: String,
        expected: ValueKind,
        got: ValueKind,
    },
}

/// Failures while building a trace
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("input `{key}` is missing")]
    MissingInput { key: String },

    #[error("input `{key}` should be a {expected}, got a {got}")]
    WrongKind {
        key: String,
        expected: ValueKind,
        got: ValueKind,
    },

    #[error("invalid input `{key}`: {message}")]
    InvalidInput { key: String, message: String },

    #[error("trace limit exceeded: more than {limit} entries")]
    TraceLimitExceeded { limit: usize },

    #[error("entry {entry} is missing visualized variable `{variable}`")]
    MissingVariable { entry: usize, variable: String },

    #[error("generator panicked: {message}")]
    Panicked { message: String },
}

impl GenerateError {
    pub fn invalid_input(key: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// A value that could not be read from its text form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot read `{text}` as a {kind}: {message}")]
pub struct ValueParseError {
    pub kind: ValueKind,
    pub text: String,
    pub message: String,
}

impl ValueParseError {
    pub fn new(kind: ValueKind, text: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.to_string(),
            message: message.into(),
        }
    }
}

/// Command line and environment configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown problem `{id}` (try --list)")]
    UnknownProblem { id: String },

    #[error("malformed input override `{text}`, expected KEY=VALUE")]
    MalformedOverride { text: String },

    #[error("problem `{problem}` has no input named `{key}`")]
    UnknownInput { problem: String, key: String },

    #[error(transparent)]
    Value(#[from] ValueParseError),

    #[error("invalid log format `{format}` (expected one of: compact, pretty, json)")]
    LogFormat { format: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
