//! Document traversal.
//!
//! The walk is depth-first and visits object entries in their original order.
//! For every entry the engine computes its path, and:
//!
//! | Rules for the path | Value     | Outcome                                   |
//! |--------------------|-----------|-------------------------------------------|
//! | yes                | any       | winning strategy applied, no further walk |
//! | no                 | container | walked with the entry's path              |
//! | no                 | scalar    | kept unchanged                            |
//!
//! Array elements share the path of the array. Conditions are evaluated against
//! the object that directly encloses the entry, as it was before censoring
//! started, so the order of sibling keys never changes which rule wins.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::{
    condition::ConditionSet,
    rules::{Paths, RuleRegistry},
    strategy::{Strategy, NOOP},
};
use crate::{error::CensorError, path};

/// Censors JSON documents according to path-based rules.
///
/// A `Censor` owns its rules and its default strategy; nothing is global. It can
/// be reused for any number of documents and shared across threads.
#[derive(Clone, Debug, Default)]
pub struct Censor {
    rules: RuleRegistry,
    default_strategy: Strategy,
}

impl Censor {
    /// An engine without rules whose default strategy is [`Strategy::constant`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine without rules that censors with `strategy` whenever a rule does
    /// not name its own.
    #[must_use]
    pub fn with_default_strategy(strategy: Strategy) -> Self {
        Self {
            rules: RuleRegistry::new(),
            default_strategy: strategy,
        }
    }

    /// An engine over an existing registry.
    #[must_use]
    pub fn from_registry(rules: RuleRegistry, default_strategy: Strategy) -> Self {
        Self {
            rules,
            default_strategy,
        }
    }

    /// Registers a rule; see [`RuleRegistry::add_rule`].
    pub fn add_rule(
        &mut self,
        paths: impl Into<Paths>,
        conditions: ConditionSet,
        strategy: Option<Strategy>,
    ) -> &mut Self {
        self.rules.add_rule(paths, conditions, strategy);
        self
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn default_strategy(&self) -> &Strategy {
        &self.default_strategy
    }

    pub fn set_default_strategy(&mut self, strategy: Strategy) {
        self.default_strategy = strategy;
    }

    /// Picks the strategy for the entry at `path`.
    ///
    /// Returns the strategy of the first rule whose conditions hold in `context`
    /// (or the default strategy if that rule names none). When no rule matches,
    /// including when `path` has no rules at all, the result is
    /// [`Strategy::Noop`].
    pub fn resolve_strategy(&self, path: &str, context: Option<&Map<String, Value>>) -> &Strategy {
        match self.rules.first_match(path, context) {
            Some(rule) => {
                let strategy = rule.strategy().unwrap_or(&self.default_strategy);
                trace!(path, strategy = strategy.name(), "censor rule matched");
                strategy
            }
            None => {
                debug!(path, "no censor rule condition matched; keeping value");
                &NOOP
            }
        }
    }

    /// Censors `document` and returns the censored copy.
    ///
    /// A scalar document is returned unchanged: only entries of containers have
    /// paths that rules can match.
    ///
    /// # Errors
    ///
    /// Fails only when a [`Strategy::Custom`] strategy fails; the error carries the
    /// path of the entry.
    pub fn censor(&self, document: Value) -> Result<Value, CensorError> {
        self.descend(document, path::ROOT)
    }

    /// Walks into containers; scalars without a rule are returned as they are.
    fn descend(&self, value: Value, path: &str) -> Result<Value, CensorError> {
        match value {
            Value::Object(object) => self.censor_object(object, path).map(Value::Object),
            Value::Array(items) => self.censor_array(items, path).map(Value::Array),
            scalar => Ok(scalar),
        }
    }

    fn censor_object(
        &self,
        object: Map<String, Value>,
        path: &str,
    ) -> Result<Map<String, Value>, CensorError> {
        // Resolve every entry against the untouched object before consuming it.
        let plan: Vec<(String, Option<&Strategy>)> = object
            .keys()
            .map(|key| {
                let entry_path = path::child(path, key);
                let strategy = self
                    .rules
                    .has_rule(&entry_path)
                    .then(|| self.resolve_strategy(&entry_path, Some(&object)));
                (entry_path, strategy)
            })
            .collect();

        object
            .into_iter()
            .zip(plan)
            .map(|((key, value), (entry_path, strategy))| {
                let censored = match strategy {
                    Some(strategy) => apply(strategy, value, &entry_path)?,
                    None => self.descend(value, &entry_path)?,
                };
                Ok((key, censored))
            })
            .collect()
    }

    fn censor_array(&self, items: Vec<Value>, path: &str) -> Result<Vec<Value>, CensorError> {
        // Elements have no enclosing object, so only unconditional rules match.
        let strategy = self
            .rules
            .has_rule(path)
            .then(|| self.resolve_strategy(path, None));

        items
            .into_iter()
            .map(|item| match strategy {
                Some(strategy) => apply(strategy, item, path),
                None => self.descend(item, path),
            })
            .collect()
    }
}

fn apply(strategy: &Strategy, value: Value, path: &str) -> Result<Value, CensorError> {
    strategy
        .apply(value)
        .map_err(|source| CensorError::Strategy {
            path: path.to_owned(),
            source,
        })
}
