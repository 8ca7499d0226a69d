//! Error types with actionable diagnostics.
//!
//! Every configuration failure names the offending field and tells the caller
//! what to change. Configuration errors are raised synchronously while a
//! [`TrainConfig`](crate::config::TrainConfig) is being built; nothing in this
//! crate retries or recovers from them.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while building or loading a training configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Two mutually exclusive fields were both supplied.
    #[error("'{first}' and '{second}' cannot both be set in TrainConfig\n  → Keep only one of them")]
    Conflict { first: &'static str, second: &'static str },

    /// A required field was not supplied.
    #[error("Missing required field '{field}'\n  → {suggestion}")]
    Missing { field: &'static str, suggestion: &'static str },

    /// A field has a value outside its allowed range or of the wrong shape.
    #[error("Invalid value for '{field}': {message}\n  → {suggestion}")]
    InvalidValue { field: &'static str, message: String, suggestion: String },

    /// Steps per epoch was not given and the data source has no defined size.
    #[error("The size of {source_kind} is undefined\n  → You must set `steps_per_epoch` explicitly")]
    UndefinedSize { source_kind: &'static str },

    /// Keys left over after legacy normalization.
    #[error("Unknown arguments: {}\n  → Check the field names against TrainConfig", .names.join(", "))]
    UnknownFields { names: Vec<String> },

    /// Configuration file has invalid syntax.
    #[error("Invalid configuration syntax in {path}:\n  {message}\n  → Check YAML syntax at the indicated line")]
    Parse { path: PathBuf, message: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create an invalid-value error.
    pub fn invalid(
        field: &'static str,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::InvalidValue { field, message: message.into(), suggestion: suggestion.into() }
    }

    /// The field this error is about, when there is a single one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Conflict { first, .. } => Some(*first),
            Self::Missing { field, .. } | Self::InvalidValue { field, .. } => Some(*field),
            Self::UndefinedSize { .. } => Some("steps_per_epoch"),
            Self::UnknownFields { .. } | Self::Parse { .. } | Self::Io { .. } => None,
        }
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Conflict { .. } => "C001",
            Self::Missing { .. } => "C002",
            Self::InvalidValue { .. } => "C003",
            Self::UndefinedSize { .. } => "C004",
            Self::UnknownFields { .. } => "C005",
            Self::Parse { .. } => "C010",
            Self::Io { .. } => "C050",
        }
    }
}

/// Errors raised while driving a training run from a validated configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The session initializer could not set up variables.
    #[error("Session initialization failed ({init}): {message}")]
    SessionInit { init: &'static str, message: String },

    /// The data source ran dry and could not be reset.
    #[error("Data source exhausted at epoch {epoch}, step {step}\n  → Lower `steps_per_epoch` or fix the dataflow's reset_state()")]
    DataExhausted { epoch: usize, step: usize },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }
}
