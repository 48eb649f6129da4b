//! JSON text and file handling around the engine.
//!
//! The engine works on `serde_json::Value` only. This module turns text into
//! documents and back, and implements the read-censor-write cycle for files.
//! Every failure is reported as a distinct [`FileError`] variant.

use std::{fs, path::Path};

use serde_json::Value;
use tracing::debug;

use crate::{censor::Censor, error::FileError};

/// Formatting of encoded output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Indent output with two spaces instead of writing it on one line.
    pub pretty: bool,
}

impl EncodeOptions {
    /// Compact, single-line output.
    #[must_use]
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Indented output.
    #[must_use]
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

/// Parses JSON text into a document.
pub fn decode(text: &str) -> Result<Value, FileError> {
    serde_json::from_str(text).map_err(FileError::InvalidJson)
}

/// Serializes a document to JSON text.
pub fn encode(document: &Value, options: EncodeOptions) -> Result<String, FileError> {
    let encoded = if options.pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    };
    encoded.map_err(FileError::Encode)
}

impl Censor {
    /// Decodes `text`, censors it and encodes the result.
    pub fn censor_json_str(&self, text: &str, options: EncodeOptions) -> Result<String, FileError> {
        let document = decode(text)?;
        let censored = self.censor(document)?;
        encode(&censored, options)
    }

    /// Reads JSON from `input`, censors it and writes the result to `output`.
    ///
    /// The destination is checked before anything is read. An existing output
    /// file is overwritten.
    ///
    /// # Errors
    ///
    /// - [`FileError::InputNotFound`] if `input` is missing or not a regular file
    /// - [`FileError::OutputIsDirectory`] if `output` is a directory
    /// - [`FileError::OutputNotWritable`] if `output` exists and is read-only
    /// - [`FileError::ReadInput`] if `input` cannot be read as UTF-8 text
    /// - [`FileError::InvalidJson`] if `input` is not valid JSON
    /// - [`FileError::Censor`] if a strategy fails
    /// - [`FileError::WriteOutput`] if writing `output` fails
    pub fn censor_json_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        options: EncodeOptions,
    ) -> Result<(), FileError> {
        let input = input.as_ref();
        let output = output.as_ref();

        if !input.is_file() {
            return Err(FileError::InputNotFound {
                path: input.to_path_buf(),
            });
        }
        check_writable(output)?;

        debug!(input = %input.display(), output = %output.display(), "censoring JSON file");

        let text = fs::read_to_string(input).map_err(|source| FileError::ReadInput {
            path: input.to_path_buf(),
            source,
        })?;
        let encoded = self.censor_json_str(&text, options)?;
        fs::write(output, encoded).map_err(|source| FileError::WriteOutput {
            path: output.to_path_buf(),
            source,
        })?;

        debug!(output = %output.display(), "censored JSON file written");
        Ok(())
    }
}

fn check_writable(output: &Path) -> Result<(), FileError> {
    let Ok(metadata) = fs::metadata(output) else {
        // Missing destinations are created by the write.
        return Ok(());
    };
    if metadata.is_dir() {
        return Err(FileError::OutputIsDirectory {
            path: output.to_path_buf(),
        });
    }
    if metadata.permissions().readonly() {
        return Err(FileError::OutputNotWritable {
            path: output.to_path_buf(),
        });
    }
    Ok(())
}
