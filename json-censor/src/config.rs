//! Declarative rule sets.
//!
//! A [`RuleSetConfig`] describes a [`Censor`] as data, so rules can live in a JSON
//! file next to the documents they censor:
//!
//! ```json
//! {
//!   "default_strategy": {"type": "constant", "scalar": "--censored--"},
//!   "rules": [
//!     {"paths": ".users.email"},
//!     {
//!       "paths": [".users.name", ".purchases.customerName"],
//!       "conditions": {"role": ["Customer", "Subscriber"]},
//!       "strategy": {"type": "hash", "algorithm": "md5"}
//!     }
//!   ]
//! }
//! ```
//!
//! Conditions use the same shape as [`ConditionSet::from_json`]: arrays are
//! strict membership tests, anything else is a loose equality test.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    censor::{Censor, ConditionSet, ConstantConfig, HashAlgorithm, Paths, Strategy},
    error::ConfigError,
};

/// A complete set of rules plus the default strategy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetConfig {
    /// Strategy for rules that do not name one.
    #[serde(default)]
    pub default_strategy: StrategyConfig,
    /// Rules in priority order.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// One rule, possibly registered on several paths.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub paths: PathsConfig,
    /// JSON object of sibling-field conditions; absent or `null` means "always".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<StrategyConfig>,
}

/// A single path or a list of paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathsConfig {
    One(String),
    Many(Vec<String>),
}

impl From<PathsConfig> for Paths {
    fn from(paths: PathsConfig) -> Self {
        match paths {
            PathsConfig::One(path) => path.into(),
            PathsConfig::Many(paths) => paths.into(),
        }
    }
}

/// Serializable description of a built-in [`Strategy`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    Constant {
        #[serde(default = "default_scalar_placeholder")]
        scalar: Value,
        #[serde(default = "default_container_placeholder")]
        container: Value,
    },
    Hash {
        #[serde(default)]
        algorithm: HashAlgorithm,
    },
    Noop,
}

fn default_scalar_placeholder() -> Value {
    ConstantConfig::default().scalar_placeholder().clone()
}

fn default_container_placeholder() -> Value {
    ConstantConfig::default().container_placeholder().clone()
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig::Constant {
            scalar: default_scalar_placeholder(),
            container: default_container_placeholder(),
        }
    }
}

impl From<StrategyConfig> for Strategy {
    fn from(config: StrategyConfig) -> Self {
        match config {
            StrategyConfig::Constant { scalar, container } => {
                Strategy::constant_with(ConstantConfig::new(scalar, container))
            }
            StrategyConfig::Hash { algorithm } => Strategy::hash_with(algorithm),
            StrategyConfig::Noop => Strategy::Noop,
        }
    }
}

impl RuleSetConfig {
    /// Parses a rule set from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a rule set from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Builds an engine with these rules, in order.
    pub fn build(self) -> Result<Censor, ConfigError> {
        let mut censor = Censor::with_default_strategy(self.default_strategy.into());
        for rule in self.rules {
            let conditions = match &rule.conditions {
                None | Some(Value::Null) => ConditionSet::new(),
                Some(conditions) => ConditionSet::from_json(conditions)?,
            };
            censor.add_rule(rule.paths, conditions, rule.strategy.map(Strategy::from));
        }
        Ok(censor)
    }
}
