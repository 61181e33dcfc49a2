//! Derive what gets stored for a promotion.
//!
//! # Usage
//!
//! ```bash
//! # Function configuration metafield value
//! vd-cli configure promotion.json
//!
//! # Metaobject field payload
//! vd-cli configure promotion.json --fields
//!
//! # Configuration of an already stored metaobject
//! vd-cli configure record.json --record
//! ```

use std::path::Path;

use volume_discount_core::VolumeDiscount;
use volume_discount_core::metaobject::MetaobjectRecord;

/// What to print for the promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    /// The function configuration metafield value.
    #[default]
    Configuration,
    /// The metaobject fields, in definition order.
    Fields,
}

/// Print the stored form of the promotion at `path`. With `record`, the
/// file holds a fetched metaobject instead of a form payload.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn execute(
    path: &Path,
    record: bool,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let promotion = if record {
        let record: MetaobjectRecord = serde_json::from_str(&super::read_input(path)?)?;
        VolumeDiscount::from_record(&record)?
    } else {
        super::read_promotion(path)?
    };

    if !promotion.is_active {
        tracing::info!(
            title = %promotion.title,
            "promotion is inactive, configuration has no tiers"
        );
    }

    let text = match output {
        Output::Configuration => promotion.function_configuration().to_metafield_value()?,
        Output::Fields => serde_json::to_string_pretty(&promotion.metaobject_fields()?)?,
    };
    super::emit(&text)?;
    Ok(())
}
