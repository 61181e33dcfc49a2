//! Core types for volume discounts.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod discount;
pub mod id;
pub mod price;
pub mod status;

pub use discount::{DiscountKind, DiscountValue};
pub use id::*;
pub use price::{CurrencyCode, CurrencyError, Price, PriceError};
pub use status::*;
