//! Path-based censoring for JSON documents.
//!
//! This crate separates:
//! - **Rules**: where sensitive data lives (a dotted path such as `.users.email`)
//!   and when it counts as sensitive (conditions on sibling fields).
//! - **Strategies**: how a matched value is censored (constant placeholder, hash,
//!   pass-through, or your own [`CensorStrategy`]).
//!
//! The engine walks a `serde_json::Value` once. Any entry whose path has rules is
//! handed to the first rule whose conditions match and is not walked any further.
//! Everything else is walked into or passed through unchanged.
//!
//! Key rules:
//! - Paths start with `.` and are built from object keys only. Array indices never
//!   appear in a path, so `.users.name` matches `name` in every element of `users`.
//! - Conditions look at the sibling fields of the matched entry, i.e. the object
//!   that directly contains it.
//! - If a path has rules but no condition set matches, the value is kept as-is.
//!
//! What this crate does:
//! - defines the rule registry, condition evaluation and traversal
//! - ships the constant, hash and no-op strategies
//! - reads and writes JSON files around the engine
//! - provides integrations behind feature flags (e.g. `slog`)
//!
//! What it does not do:
//! - query JSON (no wildcards, no index addressing, no recursive descent)
//! - validate schemas or your rule choices
//!
//! ```
//! use json_censor::{Censor, ConditionSet, Strategy};
//! use serde_json::json;
//!
//! let mut censor = Censor::new();
//! censor
//!     .add_rule(".users.email", ConditionSet::new(), None)
//!     .add_rule(
//!         ".users.name",
//!         ConditionSet::new().one_of("role", ["Customer"]),
//!         Some(Strategy::hash()),
//!     );
//!
//! let censored = censor
//!     .censor(json!({"users": [{"name": "jane", "role": "Customer", "email": "j@x.org"}]}))
//!     .unwrap();
//! assert_eq!(censored["users"][0]["email"], "--censored--");
//! assert_eq!(censored["users"][0]["role"], "Customer");
//! ```

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

// Module declarations
mod censor;
pub mod codec;
pub mod config;
mod error;
pub mod path;
#[cfg(feature = "slog")]
pub mod slog;

// Re-exports
pub use censor::{
    Censor, CensorStrategy, Condition, ConditionSet, ConstantConfig, HashAlgorithm, Paths, Rule,
    RuleRegistry, Strategy, StrategyError, CENSORED_PLACEHOLDER,
};
pub use codec::EncodeOptions;
pub use error::{CensorError, ConfigError, FileError};
