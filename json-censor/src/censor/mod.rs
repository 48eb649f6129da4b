//! Rules, conditions, strategies, and the traversal that ties them together.
//!
//! - **`strategy`**: how a matched value is censored (`CensorStrategy`, `Strategy`)
//! - **`condition`**: when a rule applies (`Condition`, `ConditionSet`)
//! - **`rules`**: where rules apply (`Rule`, `RuleRegistry`)
//! - **`engine`**: the document walk (`Censor`)
//!
//! Paths are built in `crate::path`.

mod condition;
mod engine;
mod rules;
mod strategy;

pub use condition::{Condition, ConditionSet};
pub use engine::Censor;
pub use rules::{Paths, Rule, RuleRegistry};
pub use strategy::{
    CensorStrategy, ConstantConfig, HashAlgorithm, Strategy, StrategyError, CENSORED_PLACEHOLDER,
};
