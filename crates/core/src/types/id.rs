//! Newtype wrappers for Shopify global IDs.
//!
//! Shopify identifies every resource with a GID such as
//! `gid://shopify/ProductVariant/123`. Use the `define_gid!` macro to create
//! type-safe wrappers that prevent accidentally mixing IDs from different
//! resource types.

/// Macro to define a type-safe Shopify GID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `numeric_id()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use volume_discount_core::define_gid;
/// define_gid!(ProductVariantId);
/// define_gid!(MetaobjectId);
///
/// let variant = ProductVariantId::new("gid://shopify/ProductVariant/42");
/// assert_eq!(variant.numeric_id(), "42");
///
/// // These are different types, so this won't compile:
/// // let _: MetaobjectId = variant;
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a GID string.
            #[must_use]
            pub fn new(gid: impl Into<String>) -> Self {
                Self(gid.into())
            }

            /// Get the underlying GID string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// The trailing numeric segment of the GID.
            ///
            /// `gid://shopify/Metaobject/123` yields `123`. Admin URLs carry
            /// only this segment.
            #[must_use]
            pub fn numeric_id(&self) -> &str {
                self.0.rsplit('/').next().unwrap_or(&self.0)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(gid: String) -> Self {
                Self(gid)
            }
        }

        impl From<&str> for $name {
            fn from(gid: &str) -> Self {
                Self(gid.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_gid!(ProductId);
define_gid!(ProductVariantId);
define_gid!(MetaobjectId);
define_gid!(DiscountNodeId);

impl MetaobjectId {
    /// Rebuild a metaobject GID from the numeric segment used in admin URLs.
    #[must_use]
    pub fn from_numeric(id: &str) -> Self {
        Self(format!("gid://shopify/Metaobject/{id}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id() {
        let id = ProductVariantId::new("gid://shopify/ProductVariant/4471");
        assert_eq!(id.numeric_id(), "4471");
    }

    #[test]
    fn test_numeric_id_without_slashes() {
        let id = ProductVariantId::new("4471");
        assert_eq!(id.numeric_id(), "4471");
    }

    #[test]
    fn test_metaobject_from_numeric_roundtrip() {
        let id = MetaobjectId::from_numeric("99");
        assert_eq!(id.as_str(), "gid://shopify/Metaobject/99");
        assert_eq!(MetaobjectId::from_numeric(id.numeric_id()), id);
    }

    #[test]
    fn test_serde_transparent() {
        let id = ProductVariantId::new("gid://shopify/ProductVariant/1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"gid://shopify/ProductVariant/1\"");

        let back: ProductVariantId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
