//! Error types.
//!
//! Censoring itself only fails when a strategy fails. Everything around it
//! (files, JSON syntax, rule configuration) has its own error type so callers
//! can tell the failure kinds apart.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::censor::StrategyError;

/// Failure while censoring an in-memory document.
#[derive(Debug, Error)]
pub enum CensorError {
    /// A strategy refused to censor the value at `path`.
    #[error("strategy failed to censor `{path}`: {source}")]
    Strategy {
        /// Path of the entry being censored.
        path: String,
        /// Error returned by the strategy.
        #[source]
        source: StrategyError,
    },
}

/// Failure while censoring JSON text or files.
#[derive(Debug, Error)]
pub enum FileError {
    /// The input does not exist or is not a regular file.
    #[error("input file `{}` does not exist or is not a file", path.display())]
    InputNotFound { path: PathBuf },

    /// The input exists but could not be read.
    #[error("failed to read input file `{}`: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input is not valid JSON.
    #[error("input does not contain valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The output path points to a directory.
    #[error("cannot write to `{}`: it is a directory", path.display())]
    OutputIsDirectory { path: PathBuf },

    /// The output file exists and is read-only.
    #[error("cannot write to `{}`: file is not writable", path.display())]
    OutputNotWritable { path: PathBuf },

    /// The censored document could not be encoded.
    #[error("failed to encode censored document: {0}")]
    Encode(#[source] serde_json::Error),

    /// Writing the output failed.
    #[error("failed to write output file `{}`: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Censoring the decoded document failed.
    #[error(transparent)]
    Censor(#[from] CensorError),
}

/// Failure while building a [`Censor`](crate::Censor) from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Conditions must be given as a JSON object.
    #[error("conditions must be a JSON object, got `{0}`")]
    InvalidConditions(serde_json::Value),

    /// The hash algorithm name is not supported.
    #[error("unknown hash algorithm `{0}`")]
    UnknownAlgorithm(String),

    /// The configuration file could not be read.
    #[error("failed to read rule configuration `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid JSON or does not have the expected shape.
    #[error("invalid rule configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
