//! Feed parsing through reconcile planning.
//!
//! Exercises the path a daily run takes for one batch: deserialize feed
//! records, compare against platform state, and check the resulting plan.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use skubridge_core::{ProductStatus, SupplierFeed};
use skubridge_integration_tests::fixtures::{feed_record, feed_record_json, platform_product};
use skubridge_sync::reconcile::{self, RunContext};

#[test]
fn test_unknown_sku_is_planned_for_creation() {
    let batch = [feed_record("DT-1000"), feed_record("DT-2000")];
    let platform = [platform_product("DT-1000", ProductStatus::Active)];

    let plan = reconcile::plan_batch(&batch, &platform, &RunContext::new());

    assert_eq!(plan.creates.len(), 1);
    assert_eq!(plan.creates[0].id, "DT-2000");
    assert!(plan.disables.is_empty());
}

#[test]
fn test_discontinued_record_is_not_created() {
    let batch = [feed_record_json("DT-3000", json!({ "is_old": true }))];

    let plan = reconcile::plan_batch(&batch, &[], &RunContext::new());

    assert!(plan.is_empty());
}

#[test]
fn test_liquidation_sku_is_not_created() {
    let batch = [feed_record("DT-4000LIQ"), feed_record("DT-40002EME")];

    let plan = reconcile::plan_batch(&batch, &[], &RunContext::new());

    assert!(plan.creates.is_empty());
}

#[test]
fn test_discontinued_active_product_is_disabled() {
    let batch = [feed_record_json("DT-5000", json!({ "is_old": true }))];
    let platform = [platform_product("DT-5000", ProductStatus::Active)];

    let plan = reconcile::plan_batch(&batch, &platform, &RunContext::new());

    assert_eq!(plan.disables.len(), 1);
    assert_eq!(plan.disables[0].sku, "DT-5000");
}

#[test]
fn test_already_draft_product_is_left_alone() {
    let batch = [feed_record_json("DT-5000", json!({ "is_old": true }))];
    let platform = [platform_product("DT-5000", ProductStatus::Draft)];

    let plan = reconcile::plan_batch(&batch, &platform, &RunContext::new());

    assert!(plan.disables.is_empty());
}

#[test]
fn test_product_created_this_run_is_not_redisabled() {
    // A record can appear in two overlapping feed batches; the second
    // sighting must not disable what the first one just created.
    let batch = [feed_record_json("DT-6000", json!({ "is_old": true }))];
    let platform = [platform_product("DT-6000", ProductStatus::Active)];

    let mut context = RunContext::new();
    context.mark_created("DT-6000");
    let plan = reconcile::plan_batch(&batch, &platform, &context);

    assert!(plan.disables.is_empty());
}

#[test]
fn test_catalog_price_drift_is_planned() {
    let batch = [feed_record_json(
        "DT-7000",
        json!({ "price": { "catalog": 1399.0, "promo": 999.0 } }),
    )];
    // Fixture platform product carries compare-at 1250.0
    let platform = [platform_product("DT-7000", ProductStatus::Active)];

    let plan = reconcile::plan_batch(&batch, &platform, &RunContext::new());

    assert_eq!(plan.price_updates.len(), 1);
    assert_eq!(plan.price_updates[0].product.id, "DT-7000");
}

#[test]
fn test_matching_state_yields_empty_plan() {
    let batch = [feed_record("DT-8000")];
    let platform = [platform_product("DT-8000", ProductStatus::Active)];

    let plan = reconcile::plan_batch(&batch, &platform, &RunContext::new());

    assert!(plan.is_empty());
}

#[test]
fn test_media_drift_is_planned() {
    let batch = [feed_record_json(
        "DT-9000",
        json!({
            "media": {
                "images": [
                    { "big": "https://cdn.supplier.example/images/DT-9000_front.jpg" },
                    { "big": "https://cdn.supplier.example/images/DT-9000-side.jpg" }
                ]
            }
        }),
    )];
    let platform = [platform_product("DT-9000", ProductStatus::Active)];

    let plan = reconcile::plan_batch(&batch, &platform, &RunContext::new());

    assert_eq!(plan.media_updates.len(), 1);
    assert_eq!(
        plan.media_updates[0].diff.additions,
        vec!["https://cdn.supplier.example/images/DT-9000-side.jpg"]
    );
    assert!(plan.media_updates[0].diff.deletion_ids.is_empty());
}

#[test]
fn test_feed_document_round_trip() {
    let feed: SupplierFeed = serde_json::from_value(json!({
        "data": [
            { "id": "A", "attributes": { "name": "Oven A" } },
            { "id": "B", "attributes": { "name": "Oven B", "is_old": true } }
        ]
    }))
    .unwrap();

    assert_eq!(feed.data.len(), 2);
    let plan = reconcile::plan_batch(&feed.data, &[], &RunContext::new());
    assert_eq!(plan.creates.len(), 1);
    assert_eq!(plan.creates[0].id, "A");
}
