//! Per-tier price preview, as rendered by the admin form and the storefront
//! widget.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::tier::Tier;
use crate::types::{Price, PriceError};

/// Label and badge shown above a tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierBanner {
    pub label: String,
    pub badge: String,
    pub label_bg: String,
    pub label_color: String,
    pub badge_bg: String,
    pub badge_color: String,
}

/// What one tier looks like for a given unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierPreview {
    pub quantity: i64,
    pub title: String,
    pub subtitle: String,
    pub selected: bool,
    /// Present only when both a label and a badge are set.
    pub banner: Option<TierBanner>,
    pub original: Price,
    /// `None` when the tier has no discount.
    pub discounted: Option<Price>,
}

/// Preview every tier, in authoring order, for one unit at `unit_price`.
///
/// # Errors
///
/// Returns [`PriceError::Overflow`] if a discounted price is out of range.
pub fn preview_tiers(tiers: &[Tier], unit_price: Price) -> Result<Vec<TierPreview>, PriceError> {
    tiers
        .iter()
        .map(|tier| {
            let discounted = if tier.discount > Decimal::ZERO {
                Some(unit_price.apply(tier.value())?)
            } else {
                None
            };

            Ok(TierPreview {
                quantity: tier.quantity,
                title: tier.title.clone(),
                subtitle: tier.subtitle.clone(),
                selected: tier.selected,
                banner: banner(tier),
                original: unit_price,
                discounted,
            })
        })
        .collect()
}

fn banner(tier: &Tier) -> Option<TierBanner> {
    if tier.label.is_empty() || tier.badge.is_empty() {
        return None;
    }

    Some(TierBanner {
        label: tier.label.clone(),
        badge: tier.badge.clone(),
        label_bg: tier.label_bg.clone(),
        label_color: tier.label_color.clone(),
        badge_bg: tier.badge_bg.clone(),
        badge_color: tier.badge_color.clone(),
    })
}
