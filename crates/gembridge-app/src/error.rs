//! Error taxonomy for the conversion use cases.
//!
//! Everything here is fatal to a CLI invocation (exit code 1). Inside the
//! mapping logic itself, missing optional data is never an error: absent
//! fields resolve to documented defaults so partially-populated authored
//! documents still produce usable templates.

use thiserror::Error;

/// Input format names used in parse diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Yaml,
    Json,
}

impl InputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            InputFormat::Yaml => "YAML",
            InputFormat::Json => "JSON",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unified error type for both conversion directions.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input path does not exist or could not be read.
    #[error("input file not found: {path}")]
    InputNotFound { path: String },

    /// Malformed structured-text input; carries the parser's message.
    #[error("invalid {format} input: {message}")]
    Parse {
        format: InputFormat,
        message: String,
    },

    /// Reverse direction only: the detector recognized no evaluations.
    /// The forward direction never raises this (basic-policy fallback).
    #[error("no evaluations found in input")]
    EmptyResult,

    /// Any other failure during mapping or serialization.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type ConvertResult<T> = Result<T, ConvertError>;
