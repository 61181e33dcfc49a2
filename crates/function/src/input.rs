//! Function input, as selected by the function's input query.
//!
//! ```graphql
//! query RunInput {
//!   cart { lines { quantity merchandise { __typename ... on ProductVariant { id } } } }
//!   discountNode {
//!     metafield(namespace: "$app:volume-discount", key: "function-configuration") { value }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use volume_discount_core::ProductVariantId;

/// Root of the function input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInput {
    pub cart: Cart,
    #[serde(default)]
    pub discount_node: DiscountNode,
}

impl RunInput {
    /// The raw configuration JSON, if the discount has one.
    #[must_use]
    pub fn configuration_value(&self) -> Option<&str> {
        self.discount_node
            .metafield
            .as_ref()
            .and_then(|metafield| metafield.value.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub lines: Vec<CartLine>,
}

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub quantity: i64,
    pub merchandise: Merchandise,
}

impl CartLine {
    /// Convenience constructor for a product variant line.
    #[must_use]
    pub fn variant(id: impl Into<ProductVariantId>, quantity: i64) -> Self {
        Self {
            quantity,
            merchandise: Merchandise {
                typename: Some(Merchandise::PRODUCT_VARIANT.to_owned()),
                id: Some(id.into()),
            },
        }
    }
}

/// The thing being bought. Only product variants carry an ID; custom
/// products have none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchandise {
    #[serde(rename = "__typename", default, skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductVariantId>,
}

impl Merchandise {
    pub const PRODUCT_VARIANT: &'static str = "ProductVariant";

    /// The variant ID, if this merchandise is a product variant.
    #[must_use]
    pub fn variant_id(&self) -> Option<&ProductVariantId> {
        match self.typename.as_deref() {
            Some(typename) if typename != Self::PRODUCT_VARIANT => None,
            _ => self.id.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountNode {
    #[serde(default)]
    pub metafield: Option<Metafield>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metafield {
    #[serde(default)]
    pub value: Option<String>,
}
