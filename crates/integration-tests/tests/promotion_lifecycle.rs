//! A promotion from the admin form through storage to checkout.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashMap;
use std::sync::Mutex;

use rust_decimal::Decimal;
use serde_json::{Value, json};
use volume_discount_core::metaobject::{
    DefinitionCache, DefinitionSource, MetaobjectDefinition, MetaobjectError, MetaobjectRecord,
    VOLUME_DISCOUNT_TYPE, volume_discount_definition,
};
use volume_discount_core::preview::preview_tiers;
use volume_discount_core::{CurrencyCode, MetaobjectId, Price, PromotionError, VolumeDiscount};
use volume_discount_function::EvaluatorOptions;
use volume_discount_integration_tests::{
    function_input, no_discounts, run_function, starter_tiers, variant,
};

fn form_payload(is_active: bool) -> Value {
    json!({
        "title": "Buy more, save more",
        "discountId": "gid://shopify/DiscountAutomaticNode/77",
        "products": [
            {
                "id": "gid://shopify/Product/1",
                "title": "Pineapple Soap",
                "variants": [
                    { "id": variant("A"), "title": "Small" },
                    { "id": variant("B"), "title": "Large" }
                ]
            },
            {
                "id": "gid://shopify/Product/2",
                "title": "Soap Dish",
                "variants": [{ "id": variant("C"), "title": "Default" }]
            }
        ],
        "discountValues": starter_tiers(),
        "isActive": is_active,
        "combinesWith": { "orderDiscounts": true },
        "createdAt": "2024-05-01T12:00:00.000Z"
    })
}

fn promotion(is_active: bool) -> VolumeDiscount {
    serde_json::from_value(form_payload(is_active)).unwrap()
}

/// What the admin API would return after saving `promotion`.
fn stored(promotion: &VolumeDiscount) -> MetaobjectRecord {
    let fields = promotion
        .metaobject_fields()
        .unwrap()
        .into_iter()
        .map(|field| (field.key, field.value))
        .collect();

    MetaobjectRecord {
        id: MetaobjectId::from_numeric("9001"),
        handle: "buy-more-save-more".to_owned(),
        object_type: "app--4242--volume-discount-with-id".to_owned(),
        fields,
    }
}

#[test]
fn test_saved_promotion_discounts_checkout() {
    let promotion = promotion(true);
    assert!(promotion.validation_errors().is_empty());

    let fetched = VolumeDiscount::from_record(&stored(&promotion)).unwrap();
    assert_eq!(fetched.title, promotion.title);
    assert_eq!(fetched.id.as_ref().unwrap().numeric_id(), "9001");

    let metafield = fetched.function_configuration().to_metafield_value().unwrap();
    let output = run_function(
        &function_input(&[("A", 2), ("C", 3), ("Z", 3)], Some(&metafield)),
        EvaluatorOptions::default(),
    )
    .unwrap();

    let discounts = output["discounts"].as_array().unwrap();
    assert_eq!(discounts.len(), 2);
    assert_eq!(discounts[0]["targets"][0]["productVariant"]["id"], variant("A"));
    assert_eq!(discounts[0]["message"], "You save 10%");
    assert_eq!(discounts[1]["targets"][0]["productVariant"]["id"], variant("C"));
    assert_eq!(discounts[1]["message"], "You save 20%");
}

#[test]
fn test_inactive_promotion_discounts_nothing() {
    let promotion = promotion(false);
    let metafield = promotion.function_configuration().to_metafield_value().unwrap();

    let config: Value = serde_json::from_str(&metafield).unwrap();
    assert_eq!(config["variants"].as_array().unwrap().len(), 3);

    let output = run_function(
        &function_input(&[("A", 10)], Some(&metafield)),
        EvaluatorOptions::default(),
    )
    .unwrap();
    assert_eq!(output, no_discounts());
}

#[test]
fn test_products_reference_lists_every_variant() {
    let fields = promotion(true).to_fields().unwrap();
    let reference: Vec<String> = serde_json::from_str(&fields["products_reference"]).unwrap();
    assert_eq!(reference, [variant("A"), variant("B"), variant("C")]);
}

#[test]
fn test_invalid_promotion_reports_each_problem() {
    let mut payload = form_payload(true);
    payload["title"] = json!("  ");
    payload["discountValues"][1]["quantity"] = json!(0);

    let promotion: VolumeDiscount = serde_json::from_value(payload).unwrap();
    let errors = promotion.validation_errors();

    assert!(matches!(errors[0], PromotionError::EmptyTitle));
    assert!(matches!(errors[1], PromotionError::InvalidTier { index: 1, .. }));
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_preview_matches_checkout_tier() {
    let promotion = promotion(true);
    let previews = preview_tiers(
        &promotion.discount_values,
        Price::new(Decimal::new(25, 0), CurrencyCode::USD),
    )
    .unwrap();

    assert_eq!(previews[0].discounted, None);
    assert_eq!(previews[1].discounted.unwrap().display(), "$22.50");
    assert_eq!(previews[2].discounted.unwrap().display(), "$20.00");
}

#[derive(Default)]
struct AdminApi {
    definitions: Mutex<HashMap<String, MetaobjectDefinition>>,
    fetches: Mutex<usize>,
}

impl DefinitionSource for &AdminApi {
    fn fetch(&self, object_type: &str) -> Result<Option<MetaobjectDefinition>, MetaobjectError> {
        *self.fetches.lock().unwrap() += 1;
        Ok(self.definitions.lock().unwrap().get(object_type).cloned())
    }

    fn create(
        &self,
        definition: &MetaobjectDefinition,
    ) -> Result<MetaobjectDefinition, MetaobjectError> {
        self.definitions
            .lock()
            .unwrap()
            .insert(definition.object_type.clone(), definition.clone());
        Ok(definition.clone())
    }

    fn delete(&self, object_type: &str) -> Result<(), MetaobjectError> {
        self.definitions.lock().unwrap().remove(object_type);
        Ok(())
    }
}

#[test]
fn test_app_install_defines_once() {
    let api = AdminApi::default();
    let cache = DefinitionCache::new(&api);

    let definition = cache.ensure_defined(&volume_discount_definition()).unwrap();
    assert_eq!(definition.object_type, VOLUME_DISCOUNT_TYPE);
    let fetches = *api.fetches.lock().unwrap();

    cache.ensure_defined(&volume_discount_definition()).unwrap();
    cache.get(VOLUME_DISCOUNT_TYPE).unwrap();
    assert_eq!(*api.fetches.lock().unwrap(), fetches);

    cache.remove(VOLUME_DISCOUNT_TYPE).unwrap();
    assert!(!cache.is_cached(VOLUME_DISCOUNT_TYPE));
    assert_eq!(
        cache.get(VOLUME_DISCOUNT_TYPE),
        Err(MetaobjectError::NotFound(VOLUME_DISCOUNT_TYPE.to_owned()))
    );
}
