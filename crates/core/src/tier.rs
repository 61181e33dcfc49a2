//! Quantity tiers: "buy N, get a discount".
//!
//! Tiers are authored in the admin form and stored as JSON in both the
//! promotion metaobject and the discount's configuration metafield. The form
//! writes numbers as either JSON numbers or numeric strings, so `quantity`
//! and `discount` accept both.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{DiscountKind, DiscountValue};

/// Errors reported for a tier that cannot be applied.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TierError {
    /// Tiers need at least one unit to qualify.
    #[error("tier quantity must be at least 1, got {0}")]
    NonPositiveQuantity(i64),
    /// Discounts cannot raise the price.
    #[error("tier discount cannot be negative, got {0}")]
    NegativeDiscount(Decimal),
    /// A percentage above 100 would make the line negative.
    #[error("percentage discount must be at most 100, got {0}")]
    PercentageOutOfRange(Decimal),
}

/// One quantity threshold with its discount and storefront presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Minimum units of the variant on the cart line.
    #[serde(deserialize_with = "lenient::integer")]
    pub quantity: i64,
    /// Percentage points or currency units, depending on `discount_type`.
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient::decimal"
    )]
    pub discount: Decimal,
    pub discount_type: DiscountKind,
    /// Message shown to the customer at checkout.
    #[serde(default)]
    pub discount_message: String,

    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub badge: String,
    /// Pre-selected on the storefront widget.
    #[serde(default)]
    pub selected: bool,
    #[serde(default = "defaults::label_bg")]
    pub label_bg: String,
    #[serde(default = "defaults::label_color")]
    pub label_color: String,
    #[serde(default = "defaults::badge_bg")]
    pub badge_bg: String,
    #[serde(default = "defaults::badge_color")]
    pub badge_color: String,
}

impl Tier {
    /// A percentage tier with default presentation.
    #[must_use]
    pub fn percentage(quantity: i64, discount: Decimal, message: impl Into<String>) -> Self {
        Self::new(quantity, DiscountKind::Percentage, discount, message)
    }

    /// A fixed-amount tier with default presentation.
    #[must_use]
    pub fn fixed(quantity: i64, discount: Decimal, message: impl Into<String>) -> Self {
        Self::new(quantity, DiscountKind::Fixed, discount, message)
    }

    fn new(
        quantity: i64,
        discount_type: DiscountKind,
        discount: Decimal,
        message: impl Into<String>,
    ) -> Self {
        Self {
            quantity,
            discount,
            discount_type,
            discount_message: message.into(),
            title: String::new(),
            subtitle: String::new(),
            label: String::new(),
            badge: String::new(),
            selected: false,
            label_bg: defaults::label_bg(),
            label_color: defaults::label_color(),
            badge_bg: defaults::badge_bg(),
            badge_color: defaults::badge_color(),
        }
    }

    /// The discount this tier grants.
    #[must_use]
    pub const fn value(&self) -> DiscountValue {
        self.discount_type.with_amount(self.discount)
    }

    /// Whether a line with `quantity` units reaches this tier.
    #[must_use]
    pub const fn qualifies(&self, quantity: i64) -> bool {
        quantity >= self.quantity
    }

    /// Check that the tier can be applied at checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity is below 1, the discount is
    /// negative, or a percentage exceeds 100.
    pub fn validate(&self) -> Result<(), TierError> {
        if self.quantity < 1 {
            return Err(TierError::NonPositiveQuantity(self.quantity));
        }

        if self.discount < Decimal::ZERO {
            return Err(TierError::NegativeDiscount(self.discount));
        }

        if self.discount_type == DiscountKind::Percentage && self.discount > Decimal::ONE_HUNDRED
        {
            return Err(TierError::PercentageOutOfRange(self.discount));
        }

        Ok(())
    }
}

/// Validate every tier, returning the index and error of each invalid one.
#[must_use]
pub fn validate_tiers(tiers: &[Tier]) -> Vec<(usize, TierError)> {
    tiers
        .iter()
        .enumerate()
        .filter_map(|(index, tier)| tier.validate().err().map(|err| (index, err)))
        .collect()
}

/// The tiers a new promotion starts with in the admin form.
#[must_use]
pub fn default_tiers() -> Vec<Tier> {
    vec![
        Tier {
            title: "Buy one".to_owned(),
            subtitle: "Standard price".to_owned(),
            ..Tier::percentage(1, Decimal::ZERO, "")
        },
        Tier {
            title: "Buy two get discount".to_owned(),
            subtitle: "You save 10%".to_owned(),
            label: "Most popular".to_owned(),
            badge: "Recommended".to_owned(),
            selected: true,
            label_bg: "#48cae4".to_owned(),
            badge_bg: "#0096c7".to_owned(),
            ..Tier::percentage(2, Decimal::TEN, "You save 10%")
        },
        Tier {
            title: "Buy three get discount".to_owned(),
            subtitle: "You save 20%".to_owned(),
            label: "Best value".to_owned(),
            badge: "Special offer".to_owned(),
            label_bg: "#fbc4ab".to_owned(),
            badge_bg: "#f08080".to_owned(),
            ..Tier::percentage(3, Decimal::new(20, 0), "You save 20%")
        },
    ]
}

mod defaults {
    pub fn label_bg() -> String {
        "#f7f7f7".to_owned()
    }

    pub fn label_color() -> String {
        "#000000".to_owned()
    }

    pub fn badge_bg() -> String {
        "#f55276".to_owned()
    }

    pub fn badge_color() -> String {
        "#ffffff".to_owned()
    }
}

/// Deserializers accepting JSON numbers or numeric strings.
mod lenient {
    use core::str::FromStr;

    use rust_decimal::Decimal;
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;
    use serde_json::Value;

    pub fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let text = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s,
            other => return Err(D::Error::custom(format!("expected a number, got {other}"))),
        };

        let text = text.trim();
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|_| D::Error::custom(format!("invalid number: {text:?}")))
    }

    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = decimal(deserializer)?;
        if !value.fract().is_zero() {
            return Err(D::Error::custom(format!("expected a whole number, got {value}")));
        }
        i64::try_from(value).map_err(|_| D::Error::custom(format!("number out of range: {value}")))
    }
}
