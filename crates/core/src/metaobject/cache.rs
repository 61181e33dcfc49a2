//! Per-client cache of metaobject definitions.

use moka::sync::Cache;

use super::MetaobjectError;
use super::definition::MetaobjectDefinition;

const MAX_CACHED_DEFINITIONS: u64 = 64;

/// Remote store of metaobject definitions.
///
/// Implemented by the admin API client. Arguments are typed values that the
/// implementation passes as request variables.
pub trait DefinitionSource {
    /// Fetch the definition for a type, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote request fails.
    fn fetch(&self, object_type: &str) -> Result<Option<MetaobjectDefinition>, MetaobjectError>;

    /// Create a definition and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote store rejects the definition.
    fn create(
        &self,
        definition: &MetaobjectDefinition,
    ) -> Result<MetaobjectDefinition, MetaobjectError>;

    /// Delete the definition for a type.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote store rejects the deletion.
    fn delete(&self, object_type: &str) -> Result<(), MetaobjectError>;
}

/// Definitions keyed by metaobject type, fetched on first use.
///
/// Each API client owns its own cache. Lookups that find no definition are
/// not cached, so a definition created elsewhere is picked up on the next
/// call.
pub struct DefinitionCache<S> {
    source: S,
    definitions: Cache<String, MetaobjectDefinition>,
}

impl<S: DefinitionSource> DefinitionCache<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            definitions: Cache::builder()
                .max_capacity(MAX_CACHED_DEFINITIONS)
                .build(),
        }
    }

    /// The underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The definition for `object_type`, from cache or the source.
    ///
    /// # Errors
    ///
    /// Returns [`MetaobjectError::MissingType`] for an empty type,
    /// [`MetaobjectError::NotFound`] if the source has no such definition,
    /// or the source's error.
    pub fn get(&self, object_type: &str) -> Result<MetaobjectDefinition, MetaobjectError> {
        if object_type.trim().is_empty() {
            return Err(MetaobjectError::MissingType);
        }

        self.definitions
            .try_get_with(object_type.to_owned(), || {
                self.source
                    .fetch(object_type)?
                    .ok_or_else(|| MetaobjectError::NotFound(object_type.to_owned()))
            })
            .map_err(|err| (*err).clone())
    }

    /// Create `definition` remotely and cache the stored result.
    ///
    /// # Errors
    ///
    /// Returns an error if the definition is invalid or the source rejects it.
    pub fn define(
        &self,
        definition: &MetaobjectDefinition,
    ) -> Result<MetaobjectDefinition, MetaobjectError> {
        definition.validate()?;

        let created = self.source.create(definition)?;
        self.definitions
            .insert(definition.object_type.clone(), created.clone());
        Ok(created)
    }

    /// The existing definition for `definition`'s type, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns any error other than "not found" from the lookup, or an
    /// error from [`Self::define`].
    pub fn ensure_defined(
        &self,
        definition: &MetaobjectDefinition,
    ) -> Result<MetaobjectDefinition, MetaobjectError> {
        match self.get(&definition.object_type) {
            Err(MetaobjectError::NotFound(_)) => self.define(definition),
            other => other,
        }
    }

    /// Delete the definition remotely and drop it from the cache.
    ///
    /// # Errors
    ///
    /// Returns [`MetaobjectError::NotFound`] if there is nothing to delete,
    /// or the source's error.
    pub fn remove(&self, object_type: &str) -> Result<(), MetaobjectError> {
        self.get(object_type)?;
        self.source.delete(object_type)?;
        self.definitions.invalidate(object_type);
        Ok(())
    }

    /// Whether a definition for `object_type` is currently cached.
    #[must_use]
    pub fn is_cached(&self, object_type: &str) -> bool {
        self.definitions.contains_key(object_type)
    }
}
