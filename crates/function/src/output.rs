//! Function output consumed by the checkout pricing engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use volume_discount_core::{DiscountApplicationStrategy, DiscountValue, ProductVariantId, Tier};

/// Discounts to apply and how to combine them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRunResult {
    pub discounts: Vec<Discount>,
    pub discount_application_strategy: DiscountApplicationStrategy,
}

impl FunctionRunResult {
    /// No discounts, first-only strategy.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            discounts: Vec::new(),
            discount_application_strategy: DiscountApplicationStrategy::First,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.discounts.is_empty()
    }
}

impl Default for FunctionRunResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// One discount instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub targets: Vec<Target>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub value: Value,
}

impl Discount {
    /// Apply `tier` to every unit of `variant` on the cart. Empty messages
    /// are left out.
    #[must_use]
    pub fn for_variant(variant: ProductVariantId, tier: &Tier) -> Self {
        Self {
            targets: vec![Target::ProductVariant(ProductVariantTarget { id: variant })],
            message: Some(tier.discount_message.clone()).filter(|message| !message.is_empty()),
            value: tier.value().into(),
        }
    }
}

/// What a discount applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Target {
    ProductVariant(ProductVariantTarget),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariantTarget {
    pub id: ProductVariantId,
}

/// Discount amount on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    Percentage(Percentage),
    FixedAmount(FixedAmount),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percentage {
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAmount {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl From<DiscountValue> for Value {
    fn from(value: DiscountValue) -> Self {
        match value {
            DiscountValue::Percentage(value) => Self::Percentage(Percentage { value }),
            DiscountValue::FixedAmount(amount) => Self::FixedAmount(FixedAmount { amount }),
        }
    }
}
