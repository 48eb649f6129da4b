//! Integration tests for the slog module.
//!
//! These tests verify that:
//! - `into_censored_json()` logs the censored document, never the original
//! - The `slog::Value` implementation works with slog's serialization API
//! - Failures degrade to placeholder strings instead of logging errors

#![cfg(feature = "slog")]

use std::{cell::RefCell, collections::HashMap, fmt::Arguments};

use json_censor::{
    slog::{IntoCensoredJson, CENSORING_FAILED},
    Censor, CensorStrategy, ConditionSet, Strategy, StrategyError,
};
use serde::Serialize;
use serde_json::{json, Value as JsonValue};

// A test serializer that captures serialized key-value pairs
struct CapturingSerializer {
    captured: RefCell<HashMap<String, CapturedValue>>,
}

#[derive(Debug, Clone, PartialEq)]
enum CapturedValue {
    Str(String),
    // For nested serde values, we capture the JSON representation
    Serde(JsonValue),
}

impl CapturingSerializer {
    fn new() -> Self {
        Self {
            captured: RefCell::new(HashMap::new()),
        }
    }

    fn get(&self, key: &str) -> Option<CapturedValue> {
        self.captured.borrow().get(key).cloned()
    }
}

impl slog::Serializer for CapturingSerializer {
    fn emit_arguments(&mut self, key: slog::Key, val: &Arguments<'_>) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Str(val.to_string()));
        Ok(())
    }

    fn emit_serde(&mut self, key: slog::Key, val: &dyn slog::SerdeValue) -> slog::Result {
        let json = serde_json::to_value(val.as_serde()).unwrap_or(JsonValue::Null);
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Serde(json));
        Ok(())
    }
}

/// Helper function to serialize a slog::Value into any Serializer.
fn serialize_to_capture<V: slog::Value, S: slog::Serializer>(
    value: &V,
    key: &'static str,
    serializer: &mut S,
) {
    static RS: slog::RecordStatic<'static> = slog::record_static!(slog::Level::Info, "");
    let args = format_args!("");
    let record = slog::Record::new(&RS, &args, slog::b!());
    value.serialize(&record, key, serializer).unwrap();
}

fn captured_json(serializer: &CapturingSerializer, key: &str) -> JsonValue {
    match serializer.get(key) {
        Some(CapturedValue::Serde(json)) => json,
        other => panic!("expected Serde value for '{key}', got {other:?}"),
    }
}

#[derive(Serialize)]
struct User {
    name: String,
    role: String,
    password: String,
}

fn user_censor() -> Censor {
    let mut censor = Censor::new();
    censor
        .add_rule(".password", ConditionSet::new(), None)
        .add_rule(
            ".name",
            ConditionSet::new().equals("role", "Customer"),
            Some(Strategy::hash()),
        );
    censor
}

#[test]
fn test_into_censored_json_simple_struct() {
    let user = User {
        name: "jane".into(),
        role: "Customer".into(),
        password: "hunter2".into(),
    };

    let censored = user.into_censored_json(&user_censor());

    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&censored, "user", &mut serializer);

    let json = captured_json(&serializer, "user");
    assert_eq!(json["password"], "--censored--");
    assert_eq!(json["name"], "5844a15e76563fedd11840fd6f40ea7b");
    assert_eq!(json["role"], "Customer");
}

#[test]
fn test_into_censored_json_respects_conditions() {
    let user = User {
        name: "john".into(),
        role: "Admin".into(),
        password: "hunter2".into(),
    };

    let censored = user.into_censored_json(&user_censor());
    assert_eq!(
        censored.as_json(),
        &json!({"name": "john", "role": "Admin", "password": "--censored--"})
    );
}

#[test]
fn test_into_censored_json_for_raw_values() {
    let document = json!({"events": [{"token": "abc"}, {"token": "def"}]});
    let mut censor = Censor::new();
    censor.add_rule(".events.token", ConditionSet::new(), None);

    let censored = document.into_censored_json(&censor);

    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&censored, "payload", &mut serializer);
    assert_eq!(
        captured_json(&serializer, "payload"),
        json!({"events": [{"token": "--censored--"}, {"token": "--censored--"}]})
    );
}

#[derive(Debug)]
struct Refuses;

impl CensorStrategy for Refuses {
    fn censor_scalar(&self, _value: JsonValue) -> Result<JsonValue, StrategyError> {
        Err("no".into())
    }

    fn censor_container(&self, _value: JsonValue) -> Result<JsonValue, StrategyError> {
        Err("no".into())
    }
}

#[test]
fn test_censoring_failure_logs_placeholder() {
    let mut censor = Censor::new();
    censor.add_rule(".secret", ConditionSet::new(), Some(Strategy::custom(Refuses)));

    let censored = json!({"secret": "value"}).into_censored_json(&censor);
    assert_eq!(censored.as_json(), &json!(CENSORING_FAILED));

    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&censored, "payload", &mut serializer);
    assert_eq!(
        captured_json(&serializer, "payload"),
        JsonValue::String(CENSORING_FAILED.to_owned())
    );
}
