//! Shopify metaobjects: the generic typed records the admin app persists
//! promotions in.
//!
//! This module only models definitions and records. Requests to the Admin
//! API go through a [`DefinitionSource`] implementation supplied by the
//! caller.

mod cache;
mod definition;
mod models;

pub use cache::{DefinitionCache, DefinitionSource};
pub use definition::{
    Access, FieldDefinition, FieldType, MetaobjectDefinition, MetaobjectField, MetaobjectRecord,
};
pub use models::{
    FEATURE_TYPE, VOLUME_DISCOUNT_TYPE, feature_definition, volume_discount_definition,
    volume_discount_fields,
};

/// Errors from metaobject definitions and the definition cache.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MetaobjectError {
    /// A lookup was made without a type.
    #[error("definition type is required")]
    MissingType,
    /// Required definition properties are empty.
    #[error("definition required properties: {0}")]
    InvalidDefinition(String),
    /// Two fields share a key.
    #[error("duplicate field key: {0}")]
    DuplicateFieldKey(String),
    /// The remote store has no definition for the type.
    #[error("no definition found for type: {0}")]
    NotFound(String),
    /// Record data lacks a value for a defined field.
    #[error("missing value for field: {0}")]
    MissingField(String),
    /// The remote store reported errors.
    #[error("remote error: {0}")]
    Remote(String),
}
