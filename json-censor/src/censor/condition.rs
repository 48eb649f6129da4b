//! Conditions on sibling fields.
//!
//! A [`ConditionSet`] gates a rule: the rule only applies when every condition
//! holds for the object that directly contains the matched entry. Conditions
//! never fail; a missing field or a type mismatch simply does not match.

use serde_json::{Map, Number, Value};

use crate::error::ConfigError;

/// A constraint on a single sibling field.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// The field loosely equals the value (`"100"` equals `100`, `1` equals `true`).
    Equals(Value),
    /// The field is strictly equal to one of the values (same type and value).
    OneOf(Vec<Value>),
}

impl Condition {
    /// Checks the condition against the field's value.
    pub fn matches(&self, actual: &Value) -> bool {
        match self {
            Condition::Equals(expected) => loose_eq(actual, expected),
            Condition::OneOf(allowed) => allowed.contains(actual),
        }
    }
}

/// Conjunction of sibling-field conditions.
///
/// An empty set always matches.
///
/// ```
/// use json_censor::ConditionSet;
/// use serde_json::json;
///
/// let conditions = ConditionSet::new()
///     .one_of("role", ["Customer", "Subscriber"])
///     .equals("active", true);
///
/// let user = json!({"role": "Customer", "active": 1});
/// assert!(conditions.matches(user.as_object()));
///
/// let admin = json!({"role": "Admin", "active": true});
/// assert!(!conditions.matches(admin.as_object()));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConditionSet {
    conditions: Vec<(String, Condition)>,
}

impl ConditionSet {
    /// Constructs an empty set, which matches any context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `field` to loosely equal `expected`.
    #[must_use]
    pub fn equals(self, field: impl Into<String>, expected: impl Into<Value>) -> Self {
        self.with(field, Condition::Equals(expected.into()))
    }

    /// Requires `field` to be one of `allowed`, compared strictly.
    #[must_use]
    pub fn one_of<I, V>(self, field: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with(
            field,
            Condition::OneOf(allowed.into_iter().map(Into::into).collect()),
        )
    }

    /// Adds an arbitrary condition on `field`.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, condition: Condition) -> Self {
        self.conditions.push((field.into(), condition));
        self
    }

    /// Reads conditions from a JSON object.
    ///
    /// Array values become [`Condition::OneOf`], everything else
    /// [`Condition::Equals`].
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let Value::Object(object) = value else {
            return Err(ConfigError::InvalidConditions(value.clone()));
        };
        let conditions = object
            .iter()
            .map(|(field, expected)| {
                let condition = match expected {
                    Value::Array(allowed) => Condition::OneOf(allowed.clone()),
                    scalar => Condition::Equals(scalar.clone()),
                };
                (field.clone(), condition)
            })
            .collect();
        Ok(Self { conditions })
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.conditions
            .iter()
            .map(|(field, condition)| (field.as_str(), condition))
    }

    /// Checks every condition against `context`.
    ///
    /// `context` is the object directly enclosing the entry being censored, or
    /// `None` for array elements. Without a context only the empty set matches.
    pub fn matches(&self, context: Option<&Map<String, Value>>) -> bool {
        self.conditions.iter().all(|(field, condition)| {
            context
                .and_then(|object| object.get(field))
                .is_some_and(|actual| condition.matches(actual))
        })
    }
}

/// Type-coercing comparison of two JSON values.
///
/// Mirrors the comparison rules of dynamically typed web languages:
/// - booleans compare against the truthiness of the other side
/// - `null` equals `""` and any falsy non-string value
/// - numbers equal numeric strings with the same numeric value
/// - two numeric strings compare numerically
/// - containers never equal scalars (other than booleans)
pub(crate) fn loose_eq(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Bool(flag), other) | (other, Value::Bool(flag)) => *flag == is_truthy(other),
        (Value::Null, Value::Null) => true,
        (Value::Null, Value::String(text)) | (Value::String(text), Value::Null) => text.is_empty(),
        (Value::Null, other) | (other, Value::Null) => !is_truthy(other),
        (Value::Number(left), Value::Number(right)) => numbers_eq(left, right),
        (Value::Number(number), Value::String(text))
        | (Value::String(text), Value::Number(number)) => {
            if let (Some(left), Some(right)) = (number_as_integer(number), parse_integer(text)) {
                return left == right;
            }
            match parse_numeric(text) {
                Some(parsed) => number_eq_f64(number, parsed),
                None => number.to_string() == *text,
            }
        }
        (Value::String(left), Value::String(right)) => {
            if let (Some(left), Some(right)) = (parse_integer(left), parse_integer(right)) {
                return left == right;
            }
            match (parse_numeric(left), parse_numeric(right)) {
                (Some(left), Some(right)) => float_eq(left, right),
                _ => left == right,
            }
        }
        (Value::Array(left), Value::Array(right)) => left == right,
        (Value::Object(left), Value::Object(right)) => left == right,
        _ => false,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !(text.is_empty() || text == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(object) => !object.is_empty(),
    }
}

fn numbers_eq(left: &Number, right: &Number) -> bool {
    if let (Some(left), Some(right)) = (left.as_i64(), right.as_i64()) {
        return left == right;
    }
    if let (Some(left), Some(right)) = (left.as_u64(), right.as_u64()) {
        return left == right;
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(left), Some(right)) => float_eq(left, right),
        _ => false,
    }
}

fn number_eq_f64(number: &Number, parsed: f64) -> bool {
    number.as_f64().is_some_and(|value| float_eq(value, parsed))
}

#[allow(clippy::float_cmp)]
fn float_eq(left: f64, right: f64) -> bool {
    left == right
}

fn number_as_integer(number: &Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
}

fn trim_numeric(text: &str) -> &str {
    text.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'))
}

/// Parses an integer-looking numeric string (optional sign, digits only).
///
/// Strings outside the 64-bit range fall back to float comparison.
fn parse_integer(text: &str) -> Option<i128> {
    let trimmed = trim_numeric(text);
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let parsed: i128 = trimmed.parse().ok()?;
    let in_range = i128::from(i64::MIN) <= parsed && parsed <= i128::from(u64::MAX);
    in_range.then_some(parsed)
}

/// Parses a numeric string: optional surrounding whitespace, optional sign,
/// decimal digits with an optional fraction and exponent.
fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = trim_numeric(text);
    let well_formed = trimmed.bytes().any(|b| b.is_ascii_digit())
        && trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !well_formed {
        return None;
    }
    trimmed.parse().ok()
}
