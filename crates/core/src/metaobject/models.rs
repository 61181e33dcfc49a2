//! Metaobject models owned by the app.

use super::definition::{Access, FieldDefinition, FieldType, MetaobjectDefinition};
use crate::types::{AdminAccess, StorefrontAccess};

/// Metaobject type of a volume discount promotion.
pub const VOLUME_DISCOUNT_TYPE: &str = "$app:volume-discount-with-id";

/// Metaobject type of a marketing feature entry.
pub const FEATURE_TYPE: &str = "$app:feature";

/// Field keys of the volume discount model.
pub mod volume_discount_fields {
    pub const TITLE: &str = "title";
    pub const DISCOUNT_ID: &str = "discountId";
    pub const PRODUCTS_REFERENCE: &str = "products_reference";
    pub const PRODUCTS: &str = "products";
    pub const DISCOUNT_VALUES: &str = "discountValues";
    pub const IS_ACTIVE: &str = "isActive";
    pub const COMBINES_WITH: &str = "combinesWith";
    pub const CREATED_AT: &str = "createdAt";
}

const PUBLIC: Access = Access {
    admin: AdminAccess::MerchantReadWrite,
    storefront: StorefrontAccess::PublicRead,
};

/// Schema of the promotion record. The storefront widget reads it, hence
/// public read access.
#[must_use]
pub fn volume_discount_definition() -> MetaobjectDefinition {
    use volume_discount_fields as f;

    MetaobjectDefinition {
        name: "VolumeDiscountWithID".to_owned(),
        object_type: VOLUME_DISCOUNT_TYPE.to_owned(),
        access: PUBLIC,
        field_definitions: vec![
            FieldDefinition::new("Title", f::TITLE, FieldType::SingleLineText),
            FieldDefinition::new("Discount ID", f::DISCOUNT_ID, FieldType::SingleLineText),
            FieldDefinition::new(
                "Products reference",
                f::PRODUCTS_REFERENCE,
                FieldType::VariantReferenceList,
            ),
            FieldDefinition::new("Products", f::PRODUCTS, FieldType::Json),
            FieldDefinition::new("Discount Values", f::DISCOUNT_VALUES, FieldType::Json),
            FieldDefinition::new("Is active", f::IS_ACTIVE, FieldType::Boolean),
            FieldDefinition::new("Combines with", f::COMBINES_WITH, FieldType::Json),
            FieldDefinition::new("Created at", f::CREATED_AT, FieldType::DateTime),
        ],
    }
}

/// Schema of a feature entry shown on the app's home page.
#[must_use]
pub fn feature_definition() -> MetaobjectDefinition {
    MetaobjectDefinition {
        name: "Feature".to_owned(),
        object_type: FEATURE_TYPE.to_owned(),
        access: PUBLIC,
        field_definitions: vec![
            FieldDefinition::new("Feature name", "featureName", FieldType::SingleLineText),
            FieldDefinition::new("Feature details", "featureDetails", FieldType::MultiLineText),
        ],
    }
}
