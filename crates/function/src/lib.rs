//! Volume Discount Function - checkout-time tier evaluation.
//!
//! Given a cart and the promotion's tier configuration, decides which cart
//! lines qualify, selects the tier per line, and emits discount instructions
//! for the checkout pricing engine.
//!
//! # Usage
//!
//! ```rust
//! use volume_discount_function::{EvaluatorOptions, run_json};
//!
//! let configuration = serde_json::json!({
//!     "variants": ["gid://shopify/ProductVariant/1"],
//!     "discountValues": [
//!         { "quantity": 3, "discount": 20, "discount_type": "percentage" }
//!     ]
//! });
//! let input = serde_json::json!({
//!     "cart": { "lines": [
//!         { "quantity": 3, "merchandise": { "id": "gid://shopify/ProductVariant/1" } }
//!     ] },
//!     "discountNode": { "metafield": { "value": configuration.to_string() } }
//! });
//!
//! let output = run_json(&input.to_string(), EvaluatorOptions::default()).unwrap();
//! assert!(output.contains("\"discountApplicationStrategy\":\"ALL\""));
//! ```
//!
//! # Failure policy
//!
//! A broken promotion never breaks checkout. Missing or malformed
//! configuration, and carts without eligible lines, yield no discounts. Only
//! input that does not match the function's input query is an error.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod configuration;
pub mod evaluator;
pub mod input;
pub mod output;

use thiserror::Error;
use tracing::instrument;

pub use configuration::parse_configuration;
pub use evaluator::{EmissionMode, EmissionModeError, EvaluatorOptions, evaluate};
pub use input::{Cart, CartLine, DiscountNode, Merchandise, Metafield, RunInput};
pub use output::{Discount, FunctionRunResult, Target, Value};

/// Errors at the function's JSON boundary.
#[derive(Debug, Error)]
pub enum FunctionError {
    /// The input does not match the function's input query.
    #[error("invalid function input: {0}")]
    InvalidInput(#[source] serde_json::Error),

    /// The result could not be encoded.
    #[error("failed to encode function result: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Evaluate the discount for one checkout.
#[must_use]
#[instrument(skip_all, fields(lines = input.cart.lines.len(), emission = %options.emission))]
pub fn run(input: &RunInput, options: EvaluatorOptions) -> FunctionRunResult {
    let configuration = parse_configuration(input.configuration_value());
    evaluate(&input.cart.lines, configuration.as_ref(), options)
}

/// Run the function over its JSON input and return the JSON result.
///
/// # Errors
///
/// Returns [`FunctionError::InvalidInput`] if `input` is not a valid
/// function input.
pub fn run_json(input: &str, options: EvaluatorOptions) -> Result<String, FunctionError> {
    let input: RunInput = serde_json::from_str(input).map_err(FunctionError::InvalidInput)?;
    serde_json::to_string(&run(&input, options)).map_err(FunctionError::Encode)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn input(configuration: Option<serde_json::Value>) -> RunInput {
        serde_json::from_value(json!({
            "cart": {
                "lines": [
                    { "quantity": 5, "merchandise": { "id": "gid://shopify/ProductVariant/0" } },
                    { "quantity": 1, "merchandise": { "id": "gid://shopify/ProductVariant/1" } }
                ]
            },
            "discountNode": {
                "metafield": configuration.map(|c| json!({ "value": c.to_string() }))
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_run_without_configuration() {
        let result = run(&input(None), EvaluatorOptions::default());
        assert_eq!(
            serde_json::to_value(result).unwrap(),
            json!({ "discounts": [], "discountApplicationStrategy": "FIRST" })
        );
    }

    #[test]
    fn test_run_with_configuration() {
        let configuration = json!({
            "variants": ["gid://shopify/ProductVariant/0", "gid://shopify/ProductVariant/1"],
            "discountValues": [
                {
                    "quantity": 1,
                    "discount": 0,
                    "discount_type": "percentage",
                    "discount_message": ""
                },
                {
                    "quantity": 5,
                    "discount": 10,
                    "discount_type": "percentage",
                    "discount_message": "You save 10%"
                }
            ]
        });

        let result = run(&input(Some(configuration)), EvaluatorOptions::default());
        assert_eq!(
            serde_json::to_value(result).unwrap(),
            json!({
                "discounts": [
                    {
                        "targets": [
                            { "productVariant": { "id": "gid://shopify/ProductVariant/0" } }
                        ],
                        "message": "You save 10%",
                        "value": { "percentage": { "value": 10.0 } }
                    },
                    {
                        "targets": [
                            { "productVariant": { "id": "gid://shopify/ProductVariant/1" } }
                        ],
                        "value": { "percentage": { "value": 0.0 } }
                    }
                ],
                "discountApplicationStrategy": "ALL"
            })
        );
    }

    #[test]
    fn test_run_json_rejects_bad_input() {
        assert!(matches!(
            run_json("{\"cart\": 3}", EvaluatorOptions::default()),
            Err(FunctionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_run_json_malformed_configuration_degrades() {
        let input = json!({
            "cart": { "lines": [{ "quantity": 2, "merchandise": { "id": "A" } }] },
            "discountNode": { "metafield": { "value": "not json" } }
        });
        let output = run_json(&input.to_string(), EvaluatorOptions::default()).unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&output).unwrap(),
            json!({ "discounts": [], "discountApplicationStrategy": "FIRST" })
        );
    }
}
