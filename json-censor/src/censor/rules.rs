//! Rule storage keyed by path.
//!
//! Each path owns an ordered list of rules. Order is priority: when a path is
//! censored, the first rule whose conditions match wins.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::{condition::ConditionSet, strategy::Strategy};

/// A single censoring rule attached to one path.
#[derive(Clone, Debug)]
pub struct Rule {
    conditions: ConditionSet,
    /// `None` defers to the engine's default strategy.
    strategy: Option<Strategy>,
}

impl Rule {
    #[must_use]
    pub fn new(conditions: ConditionSet, strategy: Option<Strategy>) -> Self {
        Self {
            conditions,
            strategy,
        }
    }

    pub fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    pub fn strategy(&self) -> Option<&Strategy> {
        self.strategy.as_ref()
    }

    /// Whether the rule applies given the enclosing object.
    pub fn matches(&self, context: Option<&Map<String, Value>>) -> bool {
        self.conditions.matches(context)
    }
}

/// One or more paths passed to [`RuleRegistry::add_rule`].
///
/// Built from a single `&str`/`String` or from arrays, slices and vectors of them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Paths(Vec<String>);

impl Paths {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl IntoIterator for Paths {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<&str> for Paths {
    fn from(path: &str) -> Self {
        Self(vec![path.to_owned()])
    }
}

impl From<String> for Paths {
    fn from(path: String) -> Self {
        Self(vec![path])
    }
}

impl From<&String> for Paths {
    fn from(path: &String) -> Self {
        Self(vec![path.clone()])
    }
}

impl From<Vec<String>> for Paths {
    fn from(paths: Vec<String>) -> Self {
        Self(paths)
    }
}

impl From<Vec<&str>> for Paths {
    fn from(paths: Vec<&str>) -> Self {
        paths.as_slice().into()
    }
}

impl From<&[&str]> for Paths {
    fn from(paths: &[&str]) -> Self {
        Self(paths.iter().map(|path| (*path).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Paths {
    fn from(paths: [&str; N]) -> Self {
        paths.as_slice().into()
    }
}

/// Ordered rules per path.
///
/// Lookup is by exact string match; there is no prefix or wildcard matching.
#[derive(Clone, Debug, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<String, Vec<Rule>>,
}

impl RuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule to every path in `paths`.
    ///
    /// Each path gets its own copy of the rule. Paths are not validated and
    /// duplicates are kept; they are evaluated in registration order.
    pub fn add_rule(
        &mut self,
        paths: impl Into<Paths>,
        conditions: ConditionSet,
        strategy: Option<Strategy>,
    ) -> &mut Self {
        let rule = Rule::new(conditions, strategy);
        for path in paths.into() {
            self.rules.entry(path).or_default().push(rule.clone());
        }
        self
    }

    pub fn has_rule(&self, path: &str) -> bool {
        self.rules.contains_key(path)
    }

    /// Rules registered for `path`, in registration order.
    pub fn rules_for(&self, path: &str) -> &[Rule] {
        self.rules.get(path).map(Vec::as_slice).unwrap_or_default()
    }

    /// The first rule for `path` whose conditions hold in `context`.
    pub fn first_match(&self, path: &str, context: Option<&Map<String, Value>>) -> Option<&Rule> {
        self.rules_for(path).iter().find(|rule| rule.matches(context))
    }

    /// Number of distinct paths with rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Registered paths in lexicographic order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}
