//! Metaobject definitions, records, and field payloads.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::MetaobjectError;
use crate::types::{AdminAccess, MetaobjectId, StorefrontAccess};

/// Value type of a metaobject field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "single_line_text_field")]
    SingleLineText,
    #[serde(rename = "multi_line_text_field")]
    MultiLineText,
    #[serde(rename = "list.variant_reference")]
    VariantReferenceList,
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "date_time")]
    DateTime,
}

/// One field of a metaobject definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Human-readable name shown in the Shopify admin.
    pub name: String,
    /// Key used when reading and writing values.
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldDefinition {
    #[must_use]
    pub fn new(name: &str, key: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_owned(),
            key: key.to_owned(),
            field_type,
        }
    }
}

/// Who can read and write records of a metaobject type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Access {
    pub admin: AdminAccess,
    pub storefront: StorefrontAccess,
}

/// Schema of a metaobject type.
///
/// Types prefixed with `$app:` are namespaced to the installing app by
/// Shopify, which stores them as `app--<id>--<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaobjectDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(default)]
    pub access: Access,
    pub field_definitions: Vec<FieldDefinition>,
}

impl MetaobjectDefinition {
    /// Check the definition before it is sent for creation.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or type is empty, there are no fields,
    /// or two fields share a key.
    pub fn validate(&self) -> Result<(), MetaobjectError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.object_type.trim().is_empty() {
            missing.push("type");
        }
        if self.field_definitions.is_empty() {
            missing.push("fieldDefinitions");
        }
        if !missing.is_empty() {
            return Err(MetaobjectError::InvalidDefinition(missing.join(", ")));
        }

        let mut seen = HashSet::new();
        for field in &self.field_definitions {
            if !seen.insert(field.key.as_str()) {
                return Err(MetaobjectError::DuplicateFieldKey(field.key.clone()));
            }
        }

        Ok(())
    }

    /// Look up a field by key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldDefinition> {
        self.field_definitions.iter().find(|f| f.key == key)
    }

    /// Build the create/update payload from `data`, in definition order.
    ///
    /// # Errors
    ///
    /// Returns [`MetaobjectError::MissingField`] for the first defined key
    /// absent from `data`.
    pub fn fields_for(
        &self,
        data: &BTreeMap<String, String>,
    ) -> Result<Vec<MetaobjectField>, MetaobjectError> {
        self.field_definitions
            .iter()
            .map(|def| {
                data.get(&def.key)
                    .map(|value| MetaobjectField {
                        key: def.key.clone(),
                        value: value.clone(),
                    })
                    .ok_or_else(|| MetaobjectError::MissingField(def.key.clone()))
            })
            .collect()
    }
}

/// A key/value pair in a metaobject create or update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaobjectField {
    pub key: String,
    pub value: String,
}

/// A fetched metaobject with its field values keyed by field key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaobjectRecord {
    pub id: MetaobjectId,
    pub handle: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl MetaobjectRecord {
    /// The type without Shopify's app namespace (`app--123--feature` → `feature`).
    #[must_use]
    pub fn display_type(&self) -> &str {
        self.object_type
            .rsplit("--")
            .next()
            .unwrap_or(&self.object_type)
    }

    /// A field value, if present.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}
