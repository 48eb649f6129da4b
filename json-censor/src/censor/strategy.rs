//! Censoring strategies for matched values.
//!
//! Strategies are pure value transformations. They do not pick paths, evaluate
//! conditions, or decide whether a value is sensitive; the engine does that and
//! hands them the value of a matched entry.

use std::{error::Error, fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256, Sha512};

use crate::error::ConfigError;

/// Error type returned by fallible (custom) strategies.
pub type StrategyError = Box<dyn Error + Send + Sync>;

/// Default placeholder used by [`Strategy::Constant`].
pub const CENSORED_PLACEHOLDER: &str = "--censored--";

/// A transformation applied to the value of a matched entry.
///
/// The engine calls [`censor_container`](Self::censor_container) for objects
/// and arrays and [`censor_scalar`](Self::censor_scalar) for everything else.
/// Whatever is returned replaces the original value and is not walked again.
///
/// Errors are propagated out of [`Censor::censor`](crate::Censor::censor)
/// unchanged, tagged with the path of the entry.
pub trait CensorStrategy: fmt::Debug + Send + Sync {
    /// Censors a string, number, boolean or null.
    fn censor_scalar(&self, value: Value) -> Result<Value, StrategyError>;

    /// Censors an object or array.
    fn censor_container(&self, value: Value) -> Result<Value, StrategyError>;
}

/// Placeholders written by [`Strategy::Constant`].
///
/// ```
/// use json_censor::ConstantConfig;
/// use serde_json::json;
///
/// let config = ConstantConfig::scalar("***").with_container(json!({}));
/// assert_eq!(config.scalar_placeholder(), &json!("***"));
/// assert_eq!(config.container_placeholder(), &json!({}));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantConfig {
    /// Replacement for scalar values.
    scalar: Value,
    /// Replacement for objects and arrays.
    container: Value,
}

impl ConstantConfig {
    /// Uses explicit placeholders for scalars and containers.
    #[must_use]
    pub fn new(scalar: impl Into<Value>, container: impl Into<Value>) -> Self {
        Self {
            scalar: scalar.into(),
            container: container.into(),
        }
    }

    /// Uses a custom scalar placeholder and the default container placeholder.
    #[must_use]
    pub fn scalar(scalar: impl Into<Value>) -> Self {
        Self {
            scalar: scalar.into(),
            ..Self::default()
        }
    }

    /// Replaces the container placeholder.
    #[must_use]
    pub fn with_container(mut self, container: impl Into<Value>) -> Self {
        self.container = container.into();
        self
    }

    pub fn scalar_placeholder(&self) -> &Value {
        &self.scalar
    }

    pub fn container_placeholder(&self) -> &Value {
        &self.container
    }
}

impl Default for ConstantConfig {
    /// `"--censored--"` for scalars, `["--censored--"]` for containers.
    fn default() -> Self {
        Self {
            scalar: Value::String(CENSORED_PLACEHOLDER.to_owned()),
            container: Value::Array(vec![Value::String(CENSORED_PLACEHOLDER.to_owned())]),
        }
    }
}

/// One-way hash functions available to [`Strategy::Hash`].
///
/// Digests are rendered as lowercase hexadecimal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Hashes `input` and returns the hex digest.
    #[must_use]
    pub fn digest_hex(self, input: &str) -> String {
        match self {
            HashAlgorithm::Md5 => format!("{:x}", md5::compute(input.as_bytes())),
            HashAlgorithm::Sha256 => format!("{:x}", Sha256::digest(input.as_bytes())),
            HashAlgorithm::Sha512 => format!("{:x}", Sha512::digest(input.as_bytes())),
        }
    }

    /// Hashes the string form of a scalar.
    fn hash_scalar(self, value: &Value) -> Value {
        Value::String(self.digest_hex(&scalar_to_string(value)))
    }

    /// Hashes every key and scalar of a container, recursively.
    ///
    /// Arrays become objects keyed by the hashed index. Distinct keys may hash to
    /// the same digest; later entries then overwrite earlier ones.
    fn hash_container(self, value: Value) -> Value {
        let hashed: Map<String, Value> = match value {
            Value::Object(object) => object
                .into_iter()
                .map(|(key, value)| (self.digest_hex(&key), self.hash_value(value)))
                .collect(),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, value)| (self.digest_hex(&index.to_string()), self.hash_value(value)))
                .collect(),
            scalar => return self.hash_scalar(&scalar),
        };
        Value::Object(hashed)
    }

    fn hash_value(self, value: Value) -> Value {
        if is_container(&value) {
            self.hash_container(value)
        } else {
            self.hash_scalar(&value)
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(ConfigError::UnknownAlgorithm(name.to_owned())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A censoring strategy.
///
/// The built-in variants never fail. [`Strategy::Custom`] wraps any
/// [`CensorStrategy`] implementation.
#[derive(Clone, Debug)]
pub enum Strategy {
    /// Replace the value with a fixed placeholder.
    Constant(ConstantConfig),
    /// Replace the value with its hash; containers are hashed key by key.
    Hash(HashAlgorithm),
    /// Keep the value unchanged.
    Noop,
    /// Delegate to a user-provided strategy.
    Custom(Arc<dyn CensorStrategy>),
}

pub(crate) static NOOP: Strategy = Strategy::Noop;

impl Strategy {
    /// Constructs [`Strategy::Constant`] using [`CENSORED_PLACEHOLDER`].
    #[must_use]
    pub fn constant() -> Self {
        Self::Constant(ConstantConfig::default())
    }

    /// Constructs [`Strategy::Constant`] from an explicit configuration.
    #[must_use]
    pub fn constant_with(config: ConstantConfig) -> Self {
        Self::Constant(config)
    }

    /// Constructs [`Strategy::Hash`] using MD5.
    #[must_use]
    pub fn hash() -> Self {
        Self::Hash(HashAlgorithm::default())
    }

    /// Constructs [`Strategy::Hash`] with a specific algorithm.
    #[must_use]
    pub fn hash_with(algorithm: HashAlgorithm) -> Self {
        Self::Hash(algorithm)
    }

    /// Wraps a custom strategy.
    #[must_use]
    pub fn custom<S>(strategy: S) -> Self
    where
        S: CensorStrategy + 'static,
    {
        Self::Custom(Arc::new(strategy))
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Constant(_) => "constant",
            Strategy::Hash(_) => "hash",
            Strategy::Noop => "noop",
            Strategy::Custom(_) => "custom",
        }
    }

    /// Applies the strategy to `value`, choosing the scalar or container form.
    pub fn apply(&self, value: Value) -> Result<Value, StrategyError> {
        if is_container(&value) {
            self.censor_container(value)
        } else {
            self.censor_scalar(value)
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::constant()
    }
}

impl CensorStrategy for Strategy {
    fn censor_scalar(&self, value: Value) -> Result<Value, StrategyError> {
        match self {
            Strategy::Constant(config) => Ok(config.scalar.clone()),
            Strategy::Hash(algorithm) => Ok(algorithm.hash_scalar(&value)),
            Strategy::Noop => Ok(value),
            Strategy::Custom(strategy) => strategy.censor_scalar(value),
        }
    }

    fn censor_container(&self, value: Value) -> Result<Value, StrategyError> {
        match self {
            Strategy::Constant(config) => Ok(config.container.clone()),
            Strategy::Hash(algorithm) => Ok(algorithm.hash_container(value)),
            Strategy::Noop => Ok(value),
            Strategy::Custom(strategy) => strategy.censor_container(value),
        }
    }
}

pub(crate) fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// String form of a scalar before hashing.
///
/// Booleans and null follow the usual web-scripting conversion (`true` is `"1"`,
/// `false` and `null` are empty) so digests match those produced by other
/// JSON censoring tools.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) if number.is_f64() => {
            number.as_f64().map_or_else(|| number.to_string(), float_to_string)
        }
        Value::Number(number) => number.to_string(),
        Value::Bool(true) => "1".to_owned(),
        Value::Bool(false) | Value::Null => String::new(),
        container => container.to_string(),
    }
}

/// Significant digits kept when a float is turned into a string.
const FLOAT_PRECISION: usize = 14;

/// Formats a float like PHP's string conversion with its default precision.
///
/// Whole numbers drop the fraction (`100.0` is `"100"`), and exponents below
/// -4 or from 14 upwards use scientific notation (`1.0E+25`, `1.0E-5`).
fn float_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_owned();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    // `{:e}` with a fixed precision rounds to FLOAT_PRECISION significant digits.
    let scientific = format!("{:.*e}", FLOAT_PRECISION - 1, value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    if exponent < -4 || usize::try_from(exponent).is_ok_and(|e| e >= FLOAT_PRECISION) {
        let (lead, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{lead}.{rest}E{exponent_sign}{}", exponent.unsigned_abs());
    }

    if exponent < 0 {
        let zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
        return format!("{sign}0.{zeros}{digits}");
    }

    let int_len = exponent.unsigned_abs() as usize + 1;
    if digits.len() <= int_len {
        format!("{sign}{digits:0<int_len$}")
    } else {
        let (int_part, frac_part) = digits.split_at(int_len);
        format!("{sign}{int_part}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        float_to_string, CensorStrategy, ConstantConfig, HashAlgorithm, Strategy, StrategyError,
        CENSORED_PLACEHOLDER,
    };

    const MD5_JANE: &str = "5844a15e76563fedd11840fd6f40ea7b";
    const MD5_EMPTY: &str = "d41d8cd98f00b204e9800998ecf8427e";

    #[test]
    fn constant_uses_default_placeholders() {
        let strategy = Strategy::constant();
        assert_eq!(
            strategy.censor_scalar(json!("secret")).unwrap(),
            json!(CENSORED_PLACEHOLDER)
        );
        assert_eq!(
            strategy.censor_container(json!({"a": 1})).unwrap(),
            json!([CENSORED_PLACEHOLDER])
        );
    }

    #[test]
    fn constant_uses_custom_placeholders() {
        let strategy = Strategy::constant_with(ConstantConfig::new("<hidden>", json!(null)));
        assert_eq!(strategy.censor_scalar(json!(42)).unwrap(), json!("<hidden>"));
        assert_eq!(strategy.censor_container(json!([1, 2])).unwrap(), json!(null));
    }

    #[test]
    fn constant_scalar_keeps_default_container() {
        let config = ConstantConfig::scalar("x");
        assert_eq!(config.container_placeholder(), &json!([CENSORED_PLACEHOLDER]));
    }

    #[test]
    fn hash_scalar_uses_md5_by_default() {
        let strategy = Strategy::hash();
        assert_eq!(strategy.censor_scalar(json!("jane")).unwrap(), json!(MD5_JANE));
    }

    #[test]
    fn hash_scalar_string_forms() {
        let algorithm = HashAlgorithm::Md5;
        let strategy = Strategy::hash_with(algorithm);
        assert_eq!(
            strategy.censor_scalar(json!(100)).unwrap(),
            json!(algorithm.digest_hex("100"))
        );
        assert_eq!(
            strategy.censor_scalar(json!(true)).unwrap(),
            json!(algorithm.digest_hex("1"))
        );
        assert_eq!(strategy.censor_scalar(json!(false)).unwrap(), json!(MD5_EMPTY));
        assert_eq!(strategy.censor_scalar(json!(null)).unwrap(), json!(MD5_EMPTY));
    }

    #[test]
    fn hash_scalar_whole_floats_hash_like_integers() {
        let algorithm = HashAlgorithm::Md5;
        let strategy = Strategy::hash_with(algorithm);
        assert_eq!(
            strategy.censor_scalar(json!(100.0)).unwrap(),
            json!("f899139df5e1059396431415e770c6dd")
        );
        assert_eq!(
            strategy.censor_scalar(json!(2.5)).unwrap(),
            json!(algorithm.digest_hex("2.5"))
        );
    }

    #[test]
    fn floats_format_with_fourteen_significant_digits() {
        assert_eq!(float_to_string(100.0), "100");
        assert_eq!(float_to_string(-3.0), "-3");
        assert_eq!(float_to_string(1.5), "1.5");
        assert_eq!(float_to_string(0.1 + 0.2), "0.3");
        assert_eq!(float_to_string(1.0 / 3.0), "0.33333333333333");
        assert_eq!(float_to_string(0.0001), "0.0001");
        assert_eq!(float_to_string(0.00001), "1.0E-5");
        assert_eq!(float_to_string(1e13), "10000000000000");
        assert_eq!(float_to_string(1e14), "1.0E+14");
        assert_eq!(float_to_string(1e25), "1.0E+25");
        assert_eq!(float_to_string(-1.25e-7), "-1.25E-7");
        assert_eq!(float_to_string(0.0), "0");
    }

    #[test]
    fn hash_container_hashes_keys_and_values_recursively() {
        let algorithm = HashAlgorithm::Md5;
        let hashed = Strategy::hash()
            .censor_container(json!({"apple": 5, "nested": {"k": "v"}}))
            .unwrap();

        let h = |s: &str| algorithm.digest_hex(s);
        assert_eq!(
            hashed,
            json!({
                h("apple"): h("5"),
                h("nested"): { h("k"): h("v") },
            })
        );
    }

    #[test]
    fn hash_container_turns_arrays_into_objects_keyed_by_index() {
        let algorithm = HashAlgorithm::Sha256;
        let hashed = Strategy::hash_with(algorithm)
            .censor_container(json!(["a", ["b"]]))
            .unwrap();

        let h = |s: &str| algorithm.digest_hex(s);
        assert_eq!(hashed, json!({ h("0"): h("a"), h("1"): { h("0"): h("b") } }));
    }

    #[test]
    fn digests_have_expected_lengths() {
        assert_eq!(HashAlgorithm::Md5.digest_hex("x").len(), 32);
        assert_eq!(HashAlgorithm::Sha256.digest_hex("x").len(), 64);
        assert_eq!(HashAlgorithm::Sha512.digest_hex("x").len(), 128);
    }

    #[test]
    fn algorithm_names_parse_case_insensitively() {
        assert_eq!("SHA256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("md5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert!("crc32".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn noop_returns_input() {
        let strategy = Strategy::Noop;
        assert_eq!(strategy.censor_scalar(json!("a")).unwrap(), json!("a"));
        assert_eq!(strategy.apply(json!({"a": [1]})).unwrap(), json!({"a": [1]}));
    }

    #[derive(Debug)]
    struct Upper;

    impl CensorStrategy for Upper {
        fn censor_scalar(
            &self,
            value: serde_json::Value,
        ) -> Result<serde_json::Value, StrategyError> {
            match value {
                serde_json::Value::String(text) => Ok(json!(text.to_uppercase())),
                _ => Err("only strings are supported".into()),
            }
        }

        fn censor_container(
            &self,
            _value: serde_json::Value,
        ) -> Result<serde_json::Value, StrategyError> {
            Ok(json!("CONTAINER"))
        }
    }

    #[test]
    fn custom_strategy_is_dispatched() {
        let strategy = Strategy::custom(Upper);
        assert_eq!(strategy.name(), "custom");
        assert_eq!(strategy.apply(json!("abc")).unwrap(), json!("ABC"));
        assert_eq!(strategy.apply(json!([1])).unwrap(), json!("CONTAINER"));
        assert!(strategy.apply(json!(1)).is_err());
    }
}
