//! Print what each tier costs a shopper at a given unit price.

use std::path::Path;

use rust_decimal::Decimal;
use serde_json::Value;
use volume_discount_core::preview::{TierPreview, preview_tiers};
use volume_discount_core::tier::default_tiers;
use volume_discount_core::{CurrencyCode, Price, Tier};

/// Preview the tiers in `config` (a promotion or a function configuration;
/// the form defaults when `None`) at `price`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its tiers do not parse.
pub fn execute(
    config: Option<&Path>,
    price: Decimal,
    currency: CurrencyCode,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if price < Decimal::ZERO {
        return Err(format!("price must not be negative: {price}").into());
    }

    let tiers = match config {
        Some(path) => load_tiers(path)?,
        None => default_tiers(),
    };
    let previews = preview_tiers(&tiers, Price::new(price, currency))?;

    if json {
        super::emit(&serde_json::to_string_pretty(&previews)?)?;
        return Ok(());
    }

    for preview in &previews {
        super::emit(&render(preview))?;
    }
    Ok(())
}

/// Both promotions and configurations keep their tiers under
/// `discountValues`.
fn load_tiers(path: &Path) -> Result<Vec<Tier>, Box<dyn std::error::Error>> {
    let mut root: Value = serde_json::from_str(&super::read_input(path)?)?;
    let tiers = root
        .get_mut("discountValues")
        .map(Value::take)
        .ok_or_else(|| format!("{} has no discountValues", path.display()))?;
    Ok(serde_json::from_value(tiers)?)
}

fn render(preview: &TierPreview) -> String {
    let mut line = format!("{:>4} x", preview.quantity);

    match preview.discounted {
        Some(discounted) => {
            line.push_str(&format!("  {discounted}  (was {})", preview.original));
        }
        None => line.push_str(&format!("  {}", preview.original)),
    }

    if !preview.title.is_empty() {
        line.push_str(&format!("  {}", preview.title));
    }
    if let Some(banner) = &preview.banner {
        line.push_str(&format!("  [{} | {}]", banner.label, banner.badge));
    }
    if preview.selected {
        line.push_str("  *");
    }
    line
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_tiers() {
        let previews = preview_tiers(
            &default_tiers(),
            Price::new(Decimal::new(25, 0), CurrencyCode::USD),
        )
        .unwrap();
        let lines: Vec<String> = previews.iter().map(render).collect();

        assert!(lines.first().unwrap().contains("$25.00"));
        assert!(!lines.first().unwrap().contains("was"));

        let second = lines.get(1).unwrap();
        assert!(second.contains("$22.50  (was $25.00)"));
        assert!(second.ends_with('*'));
    }

    #[test]
    fn test_largest_price() {
        assert!(execute(None, Decimal::MAX, CurrencyCode::USD, true).is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(execute(None, Decimal::NEGATIVE_ONE, CurrencyCode::USD, false).is_err());
    }
}
