//! Defensive parsing of the discount's configuration metafield.
//!
//! The metafield is written by the admin app and is trusted for nothing:
//! anything that does not look like a configuration yields `None`, and
//! individual tiers that do not parse or validate are dropped.

use serde_json::Value;
use tracing::{debug, warn};
use volume_discount_core::{DiscountConfiguration, ProductVariantId, Tier};

/// Parse the raw metafield value.
///
/// Returns `None` when the value is absent, is not a JSON object, or has no
/// `discountValues` list. A missing or malformed `variants` list yields an
/// empty eligible set.
#[must_use]
pub fn parse_configuration(raw: Option<&str>) -> Option<DiscountConfiguration> {
    let Some(raw) = raw else {
        debug!("discount has no configuration");
        return None;
    };

    let mut root = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(root)) => root,
        Ok(_) => {
            debug!("configuration is not a JSON object");
            return None;
        }
        Err(err) => {
            debug!(error = %err, "configuration is not valid JSON");
            return None;
        }
    };

    let Some(Value::Array(entries)) = root.remove("discountValues") else {
        debug!("configuration has no tier list");
        return None;
    };

    let variants = match root.remove("variants") {
        Some(Value::Array(ids)) => ids
            .into_iter()
            .filter_map(|id| match id {
                Value::String(id) => Some(ProductVariantId::from(id)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    let discount_values = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| parse_tier(index, entry))
        .collect();

    Some(DiscountConfiguration {
        variants,
        discount_values,
    })
}

fn parse_tier(index: usize, entry: Value) -> Option<Tier> {
    let tier: Tier = match serde_json::from_value(entry) {
        Ok(tier) => tier,
        Err(err) => {
            warn!(index, error = %err, "skipping malformed tier");
            return None;
        }
    };

    if let Err(err) = tier.validate() {
        warn!(index, error = %err, "skipping invalid tier");
        return None;
    }

    Some(tier)
}
