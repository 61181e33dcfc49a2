//! The discount configuration read by the checkout function.
//!
//! Stored as a JSON string in the discount node's metafield:
//!
//! ```json
//! {
//!   "variants": ["gid://shopify/ProductVariant/1"],
//!   "discountValues": [
//!     {
//!       "quantity": 2,
//!       "discount": 10,
//!       "discount_type": "percentage",
//!       "discount_message": "You save 10%"
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::tier::Tier;
use crate::types::ProductVariantId;

/// Eligible variants plus the tiers that apply to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountConfiguration {
    /// Variants whose cart lines are targeted.
    #[serde(default)]
    pub variants: Vec<ProductVariantId>,
    /// Quantity tiers, in authoring order.
    pub discount_values: Vec<Tier>,
}

impl DiscountConfiguration {
    /// Whether cart lines of this variant are targeted.
    #[must_use]
    pub fn is_eligible(&self, variant: &ProductVariantId) -> bool {
        self.variants.contains(variant)
    }

    /// Serialize into the metafield value the function reads.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_metafield_value(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
