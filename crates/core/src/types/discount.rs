//! Discount value types shared by the admin model and the checkout function.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a tier's `discount` number is interpreted.
///
/// Stored in tier JSON as `"percentage"` or `"fixed"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percentage points off the line price.
    #[default]
    Percentage,
    /// Currency units off the line price.
    Fixed,
}

impl DiscountKind {
    /// Pair this kind with an amount.
    #[must_use]
    pub const fn with_amount(self, amount: Decimal) -> DiscountValue {
        match self {
            Self::Percentage => DiscountValue::Percentage(amount),
            Self::Fixed => DiscountValue::FixedAmount(amount),
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage => write!(f, "percentage"),
            Self::Fixed => write!(f, "fixed"),
        }
    }
}

/// A concrete discount: kind plus amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountValue {
    /// Percentage points, `10` meaning 10% off.
    Percentage(Decimal),
    /// Absolute amount in the shop's currency.
    FixedAmount(Decimal),
}

impl DiscountValue {
    /// The raw number regardless of kind.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        match self {
            Self::Percentage(amount) | Self::FixedAmount(amount) => *amount,
        }
    }
}

impl fmt::Display for DiscountValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage(points) => write!(f, "{}%", points.normalize()),
            Self::FixedAmount(amount) => write!(f, "{amount:.2} off"),
        }
    }
}
