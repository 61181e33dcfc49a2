//! Integration tests for volume discounts.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p volume-discount-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout` - Function input to function output, as the platform runs it
//! - `promotion_lifecycle` - Admin form payload to stored metaobject to
//!   function configuration
//!
//! This crate holds the shared fixtures.

use serde_json::{Value, json};
use volume_discount_function::{EvaluatorOptions, FunctionError, run_json};

/// A variant GID for a short test name.
#[must_use]
pub fn variant(name: &str) -> String {
    format!("gid://shopify/ProductVariant/{name}")
}

/// The starter tiers of the admin form: 1 unit 0%, 2 units 10%, 3 units 20%.
#[must_use]
pub fn starter_tiers() -> Value {
    json!([
        tier(1, 0, ""),
        tier(2, 10, "You save 10%"),
        tier(3, 20, "You save 20%")
    ])
}

/// A percentage tier.
#[must_use]
pub fn tier(quantity: i64, percent: i64, message: &str) -> Value {
    json!({
        "quantity": quantity,
        "discount": percent,
        "discount_type": "percentage",
        "discount_message": message
    })
}

/// A function configuration for `variants` with `tiers`.
#[must_use]
pub fn configuration(variants: &[&str], tiers: &Value) -> Value {
    let variants: Vec<String> = variants.iter().map(|name| variant(name)).collect();
    json!({ "variants": variants, "discountValues": tiers })
}

/// A function input with one line per `(variant name, quantity)` and the raw
/// metafield value, if any.
#[must_use]
pub fn function_input(lines: &[(&str, i64)], metafield: Option<&str>) -> String {
    let lines: Vec<Value> = lines
        .iter()
        .map(|(name, quantity)| {
            json!({
                "quantity": quantity,
                "merchandise": { "__typename": "ProductVariant", "id": variant(name) }
            })
        })
        .collect();

    json!({
        "cart": { "lines": lines },
        "discountNode": { "metafield": metafield.map(|value| json!({ "value": value })) }
    })
    .to_string()
}

/// Run the function and decode its output.
///
/// # Errors
///
/// Returns the function's error for invalid input.
///
/// # Panics
///
/// Panics if the function writes something other than JSON.
pub fn run_function(input: &str, options: EvaluatorOptions) -> Result<Value, FunctionError> {
    let output = run_json(input, options)?;
    Ok(serde_json::from_str(&output).expect("function output is not JSON"))
}

/// The empty function result.
#[must_use]
pub fn no_discounts() -> Value {
    json!({ "discounts": [], "discountApplicationStrategy": "FIRST" })
}
