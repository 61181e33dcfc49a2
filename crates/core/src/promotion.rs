//! The volume discount promotion as persisted in a metaobject.
//!
//! Every field is stored as a string: JSON documents for structured values,
//! `"true"`/`"false"` for the active flag and an RFC 3339 timestamp for the
//! creation date. [`VolumeDiscount::to_fields`] and
//! [`VolumeDiscount::from_record`] convert between that representation and
//! the typed promotion.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::configuration::DiscountConfiguration;
use crate::metaobject::{
    MetaobjectError, MetaobjectField, MetaobjectRecord, volume_discount_definition,
    volume_discount_fields as keys,
};
use crate::tier::{Tier, TierError};
use crate::types::{DiscountNodeId, MetaobjectId, ProductId, ProductVariantId};

/// Errors converting or validating a promotion.
#[derive(thiserror::Error, Debug)]
pub enum PromotionError {
    /// A JSON field could not be decoded.
    #[error("invalid JSON in field {key}: {source}")]
    InvalidField {
        key: &'static str,
        source: serde_json::Error,
    },
    /// The creation timestamp is not RFC 3339.
    #[error("invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },
    /// Encoding a field failed.
    #[error("failed to encode promotion: {0}")]
    Encode(#[from] serde_json::Error),
    /// The record does not match the metaobject definition.
    #[error(transparent)]
    Metaobject(#[from] MetaobjectError),
    #[error("promotion title cannot be empty")]
    EmptyTitle,
    #[error("promotion must target at least one product variant")]
    NoProducts,
    #[error("promotion must have at least one tier")]
    NoTiers,
    #[error("tier #{}: {source}", .index + 1)]
    InvalidTier { index: usize, source: TierError },
}

/// A product picked in the admin resource picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSelection {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub variants: Vec<VariantSelection>,
}

/// A variant of a picked product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSelection {
    pub id: ProductVariantId,
    #[serde(default)]
    pub title: String,
}

/// Discount classes this promotion may stack with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinesWith {
    #[serde(default)]
    pub order_discounts: bool,
    #[serde(default)]
    pub product_discounts: bool,
    #[serde(default)]
    pub shipping_discounts: bool,
}

impl CombinesWith {
    /// Decode a stored value. The admin form starts from `[]`, which reads as
    /// combining with nothing.
    fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if value.is_object() {
            serde_json::from_value(value)
        } else {
            Ok(Self::default())
        }
    }
}

fn lenient_combines_with<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<CombinesWith, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    CombinesWith::from_value(value).map_err(serde::de::Error::custom)
}

/// A volume discount promotion.
///
/// Deserializes from the admin form payload (`camelCase` keys).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeDiscount {
    /// Metaobject ID, `None` until first saved.
    #[serde(default)]
    pub id: Option<MetaobjectId>,
    pub title: String,
    /// The automatic discount node running the function.
    #[serde(default)]
    pub discount_id: Option<DiscountNodeId>,
    #[serde(default)]
    pub products: Vec<ProductSelection>,
    #[serde(default)]
    pub discount_values: Vec<Tier>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_combines_with")]
    pub combines_with: CombinesWith,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl VolumeDiscount {
    /// Every selected variant, in selection order without duplicates.
    #[must_use]
    pub fn variant_ids(&self) -> Vec<ProductVariantId> {
        let mut ids: Vec<ProductVariantId> = Vec::new();
        for variant in self.products.iter().flat_map(|p| &p.variants) {
            if !ids.contains(&variant.id) {
                ids.push(variant.id.clone());
            }
        }
        ids
    }

    /// The configuration the checkout function reads for this promotion.
    ///
    /// An inactive promotion keeps its variants but carries no tiers, so
    /// the function emits nothing.
    #[must_use]
    pub fn function_configuration(&self) -> DiscountConfiguration {
        DiscountConfiguration {
            variants: self.variant_ids(),
            discount_values: if self.is_active {
                self.discount_values.clone()
            } else {
                Vec::new()
            },
        }
    }

    /// Problems that should block saving, in form order.
    #[must_use]
    pub fn validation_errors(&self) -> Vec<PromotionError> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(PromotionError::EmptyTitle);
        }
        if self.variant_ids().is_empty() {
            errors.push(PromotionError::NoProducts);
        }
        if self.discount_values.is_empty() {
            errors.push(PromotionError::NoTiers);
        }

        errors.extend(
            crate::tier::validate_tiers(&self.discount_values)
                .into_iter()
                .map(|(index, source)| PromotionError::InvalidTier { index, source }),
        );

        errors
    }

    /// Field values keyed by metaobject field key.
    ///
    /// # Errors
    ///
    /// Returns an error if a JSON field cannot be encoded.
    pub fn to_fields(&self) -> Result<BTreeMap<String, String>, PromotionError> {
        let fields = [
            (keys::TITLE, self.title.clone()),
            (
                keys::DISCOUNT_ID,
                self.discount_id
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            ),
            (
                keys::PRODUCTS_REFERENCE,
                serde_json::to_string(&self.variant_ids())?,
            ),
            (keys::PRODUCTS, serde_json::to_string(&self.products)?),
            (
                keys::DISCOUNT_VALUES,
                serde_json::to_string(&self.discount_values)?,
            ),
            (keys::IS_ACTIVE, self.is_active.to_string()),
            (
                keys::COMBINES_WITH,
                serde_json::to_string(&self.combines_with)?,
            ),
            (
                keys::CREATED_AT,
                self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        ];

        Ok(fields
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect())
    }

    /// The metaobject create/update payload, in definition order.
    ///
    /// # Errors
    ///
    /// Returns an error if a field cannot be encoded.
    pub fn metaobject_fields(&self) -> Result<Vec<MetaobjectField>, PromotionError> {
        Ok(volume_discount_definition().fields_for(&self.to_fields()?)?)
    }

    /// Decode a fetched promotion record.
    ///
    /// Missing text fields read as empty and a missing active flag as
    /// inactive; JSON fields and the timestamp must be well formed.
    ///
    /// # Errors
    ///
    /// Returns an error if a JSON field or the timestamp does not parse.
    pub fn from_record(record: &MetaobjectRecord) -> Result<Self, PromotionError> {
        let text = |key: &str| record.field(key).unwrap_or_default();

        let created_at = match record.field(keys::CREATED_AT) {
            Some(value) => DateTime::parse_from_rfc3339(value)
                .map_err(|source| PromotionError::InvalidTimestamp {
                    value: value.to_owned(),
                    source,
                })?
                .with_timezone(&Utc),
            None => DateTime::<Utc>::default(),
        };

        Ok(Self {
            id: Some(record.id.clone()),
            title: text(keys::TITLE).to_owned(),
            discount_id: Some(text(keys::DISCOUNT_ID))
                .filter(|id| !id.is_empty())
                .map(DiscountNodeId::from),
            products: json_field(record, keys::PRODUCTS)?.unwrap_or_default(),
            discount_values: json_field(record, keys::DISCOUNT_VALUES)?.unwrap_or_default(),
            is_active: text(keys::IS_ACTIVE) == "true",
            combines_with: json_field::<serde_json::Value>(record, keys::COMBINES_WITH)?
                .map(CombinesWith::from_value)
                .transpose()
                .map_err(|source| PromotionError::InvalidField {
                    key: keys::COMBINES_WITH,
                    source,
                })?
                .unwrap_or_default(),
            created_at,
        })
    }
}

fn json_field<T: DeserializeOwned>(
    record: &MetaobjectRecord,
    key: &'static str,
) -> Result<Option<T>, PromotionError> {
    record
        .field(key)
        .filter(|value| !value.trim().is_empty())
        .map(serde_json::from_str)
        .transpose()
        .map_err(|source| PromotionError::InvalidField { key, source })
}
