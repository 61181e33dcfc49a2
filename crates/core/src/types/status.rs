//! Status and mode enums mirrored from Shopify's schemas.

use serde::{Deserialize, Serialize};

/// Whether the pricing engine applies only the first discount or all of them.
///
/// Maps to Shopify's `DiscountApplicationStrategy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountApplicationStrategy {
    /// Only the first discount is applied.
    #[default]
    First,
    /// Every discount is applied.
    All,
}

/// Admin API access to a metaobject type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminAccess {
    MerchantRead,
    #[default]
    MerchantReadWrite,
}

/// Storefront API access to a metaobject type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorefrontAccess {
    #[default]
    None,
    PublicRead,
}
