//! Censors a (deliberately awkward) API response before it is shared.
//!
//! Run with `cargo run --example api_response`.

use json_censor::{codec, Censor, ConditionSet, EncodeOptions, FileError, Strategy};
use serde_json::json;

fn main() -> Result<(), FileError> {
    let response = json!({
        "users": [
            {"name": "john", "role": "Admin", "email": "john.doe@example.org", "moneySpent": 0},
            {"name": "jane", "role": "Customer", "email": "jane.doe@example.org", "moneySpent": 100},
            {"name": "alex", "role": "Subscriber", "email": "alex.doe@example.org", "moneySpent": 0},
        ],
        "purchases": [
            {"customerName": "jane", "items": {"apple": 5, "banana": 2}},
        ],
    });

    let mut censor = Censor::new();
    censor
        // Nobody's email survives; no conditions means "always".
        .add_rule(".users.email", ConditionSet::new(), Some(Strategy::constant()))
        // Paying users get their name hashed, which keeps purchases attributable.
        .add_rule(
            ".users.name",
            ConditionSet::new().one_of("role", ["Customer", "Subscriber"]),
            Some(Strategy::hash()),
        )
        // Only customers spend money; falls back to the default (constant) strategy.
        .add_rule(
            ".users.moneySpent",
            ConditionSet::new().equals("role", "Customer"),
            None,
        )
        // Same hash as above, so purchases still line up with users.
        .add_rule(".purchases.customerName", ConditionSet::new(), Some(Strategy::hash()));

    let censored = censor.censor(response)?;
    println!("{}", codec::encode(&censored, EncodeOptions::pretty())?);
    Ok(())
}
