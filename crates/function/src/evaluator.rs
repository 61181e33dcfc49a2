//! Tier selection and discount emission.
//!
//! For every cart line whose variant is eligible, the tier with the highest
//! quantity threshold the line reaches wins. Tiers are never combined.

use core::fmt;
use core::str::FromStr;
use std::collections::HashSet;

use tracing::{debug, warn};
use volume_discount_core::{
    DiscountApplicationStrategy, DiscountConfiguration, ProductVariantId, Tier,
};

use crate::input::CartLine;
use crate::output::{Discount, FunctionRunResult};

/// Errors parsing an [`EmissionMode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown emission mode {0:?} (expected best-tier or every-qualifying-tier)")]
pub struct EmissionModeError(String);

/// How many instructions a qualifying line produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmissionMode {
    /// One instruction per line, from the best tier.
    #[default]
    BestTier,
    /// One instruction per tier the line reaches, each carrying the best
    /// tier's message and value. Reproduces the output of the first
    /// release of the function, zero-value instructions included.
    EveryQualifyingTier,
}

impl FromStr for EmissionMode {
    type Err = EmissionModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "best-tier" => Ok(Self::BestTier),
            "every-qualifying-tier" => Ok(Self::EveryQualifyingTier),
            _ => Err(EmissionModeError(s.to_owned())),
        }
    }
}

impl fmt::Display for EmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BestTier => write!(f, "best-tier"),
            Self::EveryQualifyingTier => write!(f, "every-qualifying-tier"),
        }
    }
}

/// Knobs for [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvaluatorOptions {
    pub emission: EmissionMode,
}

/// Decide the discounts for `lines` under `configuration`.
///
/// Never fails: a missing configuration, an empty cart or a cart without
/// eligible lines all produce [`FunctionRunResult::empty`].
#[must_use]
pub fn evaluate(
    lines: &[CartLine],
    configuration: Option<&DiscountConfiguration>,
    options: EvaluatorOptions,
) -> FunctionRunResult {
    let Some(configuration) = configuration else {
        return FunctionRunResult::empty();
    };

    let targets = target_lines(lines, configuration);
    if targets.is_empty() {
        warn!("no cart lines qualify for volume discount");
        return FunctionRunResult::empty();
    }

    let tiers = tiers_by_quantity_desc(&configuration.discount_values);

    let mut discounts = Vec::new();
    for (variant, line) in targets {
        let Some(best) = best_tier(&tiers, line.quantity) else {
            debug!(%variant, quantity = line.quantity, "line is below every tier");
            continue;
        };

        if best.quantity <= 0 {
            continue;
        }

        let copies = match options.emission {
            EmissionMode::BestTier => 1,
            EmissionMode::EveryQualifyingTier => tiers
                .iter()
                .filter(|tier| tier.qualifies(line.quantity))
                .count(),
        };

        debug!(
            %variant,
            quantity = line.quantity,
            tier = best.quantity,
            value = %best.value(),
            copies,
            "line qualifies"
        );

        discounts.extend(std::iter::repeat_n(
            Discount::for_variant(variant.clone(), best),
            copies,
        ));
    }

    if discounts.is_empty() {
        return FunctionRunResult::empty();
    }

    FunctionRunResult {
        discounts,
        discount_application_strategy: DiscountApplicationStrategy::All,
    }
}

/// Cart lines of eligible variants, in cart order.
fn target_lines<'a>(
    lines: &'a [CartLine],
    configuration: &DiscountConfiguration,
) -> Vec<(&'a ProductVariantId, &'a CartLine)> {
    let eligible: HashSet<&ProductVariantId> = configuration.variants.iter().collect();

    lines
        .iter()
        .filter_map(|line| {
            line.merchandise
                .variant_id()
                .filter(|id| eligible.contains(id))
                .map(|id| (id, line))
        })
        .collect()
}

/// Tiers ordered by threshold, highest first. Equal thresholds keep their
/// authoring order.
fn tiers_by_quantity_desc(tiers: &[Tier]) -> Vec<&Tier> {
    let mut sorted: Vec<&Tier> = tiers.iter().collect();
    sorted.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    sorted
}

/// The first tier in `sorted` that `quantity` reaches.
fn best_tier<'a>(sorted: &[&'a Tier], quantity: i64) -> Option<&'a Tier> {
    sorted.iter().copied().find(|tier| tier.qualifies(quantity))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::output::{Target, Value};

    fn config(variants: &[&str], tiers: Vec<Tier>) -> DiscountConfiguration {
        DiscountConfiguration {
            variants: variants.iter().copied().map(ProductVariantId::from).collect(),
            discount_values: tiers,
        }
    }

    fn standard_tiers() -> Vec<Tier> {
        vec![
            Tier::percentage(1, Decimal::ZERO, ""),
            Tier::percentage(2, Decimal::TEN, "You save 10%"),
            Tier::percentage(3, Decimal::new(20, 0), "You save 20%"),
        ]
    }

    fn percentages(result: &FunctionRunResult) -> Vec<Decimal> {
        result
            .discounts
            .iter()
            .map(|discount| match discount.value {
                Value::Percentage(p) => p.value,
                Value::FixedAmount(f) => f.amount,
            })
            .collect()
    }

    #[test]
    fn test_no_configuration() {
        let lines = [CartLine::variant("A", 5)];
        assert_eq!(
            evaluate(&lines, None, EvaluatorOptions::default()),
            FunctionRunResult::empty()
        );
    }

    #[test]
    fn test_empty_cart() {
        let config = config(&["A"], standard_tiers());
        assert!(evaluate(&[], Some(&config), EvaluatorOptions::default()).is_empty());
    }

    #[test]
    fn test_line_not_targeted() {
        let config = config(&["A"], standard_tiers());
        let lines = [CartLine::variant("B", 5)];
        assert_eq!(
            evaluate(&lines, Some(&config), EvaluatorOptions::default()),
            FunctionRunResult::empty()
        );
    }

    #[test]
    fn test_best_tier_wins() {
        let config = config(&["A"], standard_tiers());
        let lines = [CartLine::variant("A", 5)];

        let result = evaluate(&lines, Some(&config), EvaluatorOptions::default());

        assert_eq!(
            result.discount_application_strategy,
            DiscountApplicationStrategy::All
        );
        assert_eq!(percentages(&result), [Decimal::new(20, 0)]);

        let discount = result.discounts.first().unwrap();
        assert_eq!(
            discount.targets,
            [Target::ProductVariant(crate::output::ProductVariantTarget {
                id: ProductVariantId::new("A"),
            })]
        );
        assert_eq!(discount.message.as_deref(), Some("You save 20%"));
    }

    #[test]
    fn test_authoring_order_does_not_matter() {
        let mut tiers = standard_tiers();
        tiers.reverse();
        tiers.swap(0, 1);
        let config = config(&["A"], tiers);

        let result = evaluate(
            &[CartLine::variant("A", 2)],
            Some(&config),
            EvaluatorOptions::default(),
        );
        assert_eq!(percentages(&result), [Decimal::TEN]);
    }

    #[test]
    fn test_selected_tier_never_exceeds_quantity() {
        let tiers = vec![
            Tier::percentage(2, Decimal::new(5, 0), ""),
            Tier::percentage(5, Decimal::new(15, 0), ""),
            Tier::percentage(10, Decimal::new(25, 0), ""),
        ];
        let config = config(&["A"], tiers);

        let expected = [
            (1, None),
            (2, Some(5)),
            (4, Some(5)),
            (5, Some(15)),
            (9, Some(15)),
            (10, Some(25)),
            (1000, Some(25)),
        ];
        for (quantity, percent) in expected {
            let result = evaluate(
                &[CartLine::variant("A", quantity)],
                Some(&config),
                EvaluatorOptions::default(),
            );
            assert_eq!(
                percentages(&result).first().copied(),
                percent.map(|p| Decimal::new(p, 0)),
                "quantity {quantity}"
            );
        }
    }

    #[test]
    fn test_equal_thresholds_keep_authoring_order() {
        let tiers = vec![
            Tier::percentage(2, Decimal::new(5, 0), "first"),
            Tier::percentage(2, Decimal::new(8, 0), "second"),
        ];
        let config = config(&["A"], tiers);
        let result = evaluate(
            &[CartLine::variant("A", 2)],
            Some(&config),
            EvaluatorOptions::default(),
        );
        assert_eq!(
            result.discounts.first().unwrap().message.as_deref(),
            Some("first")
        );
    }

    #[test]
    fn test_zero_quantity_line() {
        let config = config(&["A"], standard_tiers());
        let result = evaluate(
            &[CartLine::variant("A", 0)],
            Some(&config),
            EvaluatorOptions::default(),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_zero_value_tier_still_emits() {
        let tiers = vec![
            Tier::percentage(1, Decimal::ZERO, ""),
            Tier::percentage(2, Decimal::TEN, "You save 10%"),
        ];
        let config = config(&["A"], tiers);
        let result = evaluate(
            &[CartLine::variant("A", 1)],
            Some(&config),
            EvaluatorOptions::default(),
        );

        assert_eq!(percentages(&result), [Decimal::ZERO]);
        assert_eq!(result.discounts.first().unwrap().message, None);
        assert_eq!(
            result.discount_application_strategy,
            DiscountApplicationStrategy::All
        );
    }

    #[test]
    fn test_each_line_gets_its_own_tier() {
        let config = config(&["A", "B"], standard_tiers());
        let lines = [
            CartLine::variant("A", 2),
            CartLine::variant("C", 9),
            CartLine::variant("B", 3),
        ];

        let result = evaluate(&lines, Some(&config), EvaluatorOptions::default());

        assert_eq!(percentages(&result), [Decimal::TEN, Decimal::new(20, 0)]);

        let lines = [CartLine::variant("A", 1), CartLine::variant("B", 2)];
        let result = evaluate(&lines, Some(&config), EvaluatorOptions::default());
        assert_eq!(percentages(&result), [Decimal::ZERO, Decimal::TEN]);
    }

    #[test]
    fn test_fixed_amount_tier() {
        let tiers = vec![Tier::fixed(2, Decimal::new(5, 0), "$5 off")];
        let config = config(&["A"], tiers);
        let result = evaluate(
            &[CartLine::variant("A", 2)],
            Some(&config),
            EvaluatorOptions::default(),
        );
        assert!(matches!(
            result.discounts.first().unwrap().value,
            Value::FixedAmount(_)
        ));
    }

    #[test]
    fn test_every_qualifying_tier_mode() {
        let config = config(&["A"], standard_tiers());
        let options = EvaluatorOptions {
            emission: EmissionMode::EveryQualifyingTier,
        };

        let result = evaluate(&[CartLine::variant("A", 5)], Some(&config), options);
        assert_eq!(percentages(&result), [Decimal::new(20, 0); 3]);

        let result = evaluate(&[CartLine::variant("A", 1)], Some(&config), options);
        assert_eq!(percentages(&result), [Decimal::ZERO]);
        assert_eq!(
            result.discount_application_strategy,
            DiscountApplicationStrategy::All
        );
    }

    #[test]
    fn test_idempotent() {
        let config = config(&["A", "B"], standard_tiers());
        let lines = [CartLine::variant("A", 3), CartLine::variant("B", 2)];
        let first = evaluate(&lines, Some(&config), EvaluatorOptions::default());
        let second = evaluate(&lines, Some(&config), EvaluatorOptions::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_emission_mode_from_str() {
        assert_eq!("best-tier".parse(), Ok(EmissionMode::BestTier));
        assert_eq!(
            "EVERY_QUALIFYING_TIER".parse(),
            Ok(EmissionMode::EveryQualifyingTier)
        );
        assert!("all".parse::<EmissionMode>().is_err());
        assert_eq!(
            EmissionMode::EveryQualifyingTier.to_string(),
            "every-qualifying-tier"
        );
    }
}
