//! Print the metaobject definitions the app registers.

use clap::ValueEnum;
use volume_discount_core::metaobject::{
    MetaobjectDefinition, feature_definition, volume_discount_definition,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DefinitionKind {
    /// `$app:volume-discount-with-id`
    VolumeDiscount,
    /// `$app:feature`
    Feature,
}

impl DefinitionKind {
    fn definition(self) -> MetaobjectDefinition {
        match self {
            Self::VolumeDiscount => volume_discount_definition(),
            Self::Feature => feature_definition(),
        }
    }
}

/// Print the definition for `kind` as JSON.
///
/// # Errors
///
/// Returns an error if the definition is incomplete or cannot be encoded.
pub fn execute(kind: DefinitionKind) -> Result<(), Box<dyn std::error::Error>> {
    let definition = kind.definition();
    definition.validate()?;
    super::emit(&serde_json::to_string_pretty(&definition)?)?;
    Ok(())
}
