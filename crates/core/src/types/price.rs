//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::discount::DiscountValue;

/// Errors that can occur when parsing a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// The code is not one of the supported ISO 4217 codes.
    #[error("unsupported currency code: {0}")]
    Unsupported(String),
}

/// Errors from price arithmetic.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The discounted amount does not fit in a decimal.
    #[error("discount {value} on {amount} is out of range")]
    Overflow { amount: Decimal, value: DiscountValue },
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Price after a discount, the way the checkout pricing engine applies it.
    ///
    /// Percentages are percentage points (`10` takes 10% off). Fixed amounts
    /// are subtracted as-is. The result is rounded to cents and never drops
    /// below zero.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use volume_discount_core::{CurrencyCode, DiscountValue, Price};
    ///
    /// let price = Price::new(Decimal::new(25, 0), CurrencyCode::USD);
    /// let discounted = price.apply(DiscountValue::Percentage(Decimal::TEN)).unwrap();
    /// assert_eq!(discounted.amount, Decimal::new(2250, 2));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the arithmetic leaves the range
    /// of a decimal.
    pub fn apply(self, value: DiscountValue) -> Result<Self, PriceError> {
        let discounted = match value {
            DiscountValue::Percentage(points) => points
                .checked_div(Decimal::ONE_HUNDRED)
                .and_then(|fraction| self.amount.checked_mul(fraction))
                .and_then(|off| self.amount.checked_sub(off)),
            DiscountValue::FixedAmount(amount) => self.amount.checked_sub(amount),
        }
        .ok_or(PriceError::Overflow {
            amount: self.amount,
            value,
        })?;

        Ok(Self::new(
            discounted
                .max(Decimal::ZERO)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            self.currency_code,
        ))
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// The three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(CurrencyError::Unsupported(s.to_owned())),
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
