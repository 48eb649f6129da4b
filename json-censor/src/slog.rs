//! Adapters for emitting censored documents through `slog`.
//!
//! This module connects [`Censor`] with `slog` by providing a `slog::Value`
//! that serializes the censored form of a payload as structured JSON via
//! `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is the output of [`Censor::censor`],
//!   never the original value.
//! - Avoiding fallible logging APIs: serialization or censoring failures are
//!   represented as placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or decide which rules apply.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::censor::Censor;

/// Logged in place of a payload that could not be converted to JSON.
pub const SERIALIZATION_FAILED: &str = "Failed to serialize value for censoring";

/// Logged in place of a payload whose censoring failed.
pub const CENSORING_FAILED: &str = "Failed to censor value";

/// A `slog::Value` that emits an already censored payload as structured JSON.
#[derive(Clone, Debug)]
pub struct CensoredJson {
    value: JsonValue,
}

impl CensoredJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// The censored payload.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for CensoredJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts values into a `slog::Value` that logs their censored JSON form.
///
/// ## Example
/// ```ignore
/// use json_censor::slog::IntoCensoredJson;
///
/// info!(logger, "api response"; "body" => response.into_censored_json(&censor));
/// ```
pub trait IntoCensoredJson: Serialize + Sized {
    /// Serializes `self`, censors it with `censor`, and wraps the result.
    ///
    /// If serialization fails the payload becomes the string
    /// [`SERIALIZATION_FAILED`]; if censoring fails it becomes
    /// [`CENSORING_FAILED`]. The original value is never logged.
    fn into_censored_json(self, censor: &Censor) -> CensoredJson {
        let censored = match serde_json::to_value(self) {
            Ok(document) => censor
                .censor(document)
                .unwrap_or_else(|_| JsonValue::String(CENSORING_FAILED.to_owned())),
            Err(_) => JsonValue::String(SERIALIZATION_FAILED.to_owned()),
        };
        CensoredJson::new(censored)
    }
}

impl<T> IntoCensoredJson for T where T: Serialize {}
