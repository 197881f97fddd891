//! Product relationship resolution.
//!
//! Supplier records reference each other by SKU (accessories, bundle
//! contents, replacement products); the storefront theme reads these as
//! product-reference metafields, which require platform product ids. The
//! resolver turns SKU edges into id edges: ids already known from the
//! current run (created or queried products) are reused, the rest are
//! looked up by SKU in batches, and edges that still resolve to nothing
//! are dropped without error. A missing target usually means the
//! referenced product was never migrated (liquidation SKUs, mostly) and
//! must not fail the run.

use std::collections::HashMap;

use serde_json::Value;
use skubridge_core::{MetafieldInput, SkuRef, SupplierProduct, batch};
use tracing::{info, instrument};

use crate::shopify::{PlatformClient, PlatformError, UserError};

/// SKU-lookup batch size for resolving unknown references.
const SKU_LOOKUP_BATCH_SIZE: usize = 100;
/// `metafieldsSet` accepts at most 25 inputs.
const METAFIELD_BATCH_SIZE: usize = 25;

/// Build the relationship metafields for the given referrer records,
/// using `resolved` as the SKU to product-id mapping.
///
/// Rules:
/// - a referrer whose own SKU did not resolve contributes nothing
/// - `accessories` and `includedProducts` are written whenever the source
///   list is non-empty, with whatever subset resolved (possibly empty)
/// - `replacement_product_id` is written only when its target resolved
/// - self-references are dropped
#[must_use]
pub fn build_relationship_metafields(
    referrers: &[SupplierProduct],
    resolved: &HashMap<String, String>,
) -> Vec<MetafieldInput> {
    let mut metafields = Vec::new();

    for record in referrers {
        let Some(owner_id) = resolved.get(&record.id) else {
            continue;
        };

        let accessories = &record.attributes.accessories;
        if !accessories.is_empty() {
            metafields.push(
                MetafieldInput::product(
                    "accessories",
                    "list.product_reference",
                    reference_list(&record.id, accessories.iter().map(String::as_str), resolved),
                )
                .with_owner(owner_id),
            );
        }

        let included = record.included_product_skus();
        if !included.is_empty() {
            metafields.push(
                MetafieldInput::product(
                    "includedProducts",
                    "list.product_reference",
                    reference_list(&record.id, included.into_iter(), resolved),
                )
                .with_owner(owner_id),
            );
        }

        if let Some(replacement_sku) = &record.attributes.replacement_product_id
            && replacement_sku != &record.id
            && let Some(replacement_id) = resolved.get(replacement_sku)
        {
            metafields.push(
                MetafieldInput::product(
                    "replacement_product_id",
                    "product_reference",
                    replacement_id.clone(),
                )
                .with_owner(owner_id),
            );
        }
    }

    metafields
}

fn reference_list<'a>(
    own_sku: &str,
    skus: impl Iterator<Item = &'a str>,
    resolved: &HashMap<String, String>,
) -> String {
    let ids: Vec<&str> = skus
        .filter(|sku| *sku != own_sku)
        .filter_map(|sku| resolved.get(sku).map(String::as_str))
        .collect();
    Value::from(ids).to_string()
}

/// Resolve and write the relationship metafields for every referrer.
///
/// `known` seeds the resolution with id/SKU pairs already in hand
/// (products created or queried earlier in the run); only the remainder
/// is looked up. Per-metafield user errors are collected across batches
/// and returned for dead-lettering.
///
/// # Errors
///
/// Returns an error when a SKU lookup or a `metafieldsSet` call fails at
/// the transport or GraphQL level.
#[instrument(skip_all, fields(referrers = referrers.len(), known = known.len()))]
pub async fn sync_relationships(
    client: &PlatformClient,
    referrers: &[SupplierProduct],
    known: &[SkuRef],
) -> Result<Vec<UserError>, PlatformError> {
    let mut referenced: Vec<String> = referrers.iter().map(|r| r.id.clone()).collect();
    for record in referrers {
        for edge in record.relationship_edges() {
            referenced.push(edge.to_sku);
        }
    }
    let needed = batch::dedup(&referenced);
    if needed.is_empty() {
        return Ok(Vec::new());
    }

    let mut resolved: HashMap<String, String> = known
        .iter()
        .filter(|sku_ref| needed.contains(&sku_ref.sku))
        .map(|sku_ref| (sku_ref.sku.clone(), sku_ref.id.clone()))
        .collect();

    let missing: Vec<&String> = needed
        .iter()
        .filter(|sku| !resolved.contains_key(*sku))
        .collect();
    info!(
        needed = needed.len(),
        missing = missing.len(),
        "resolving relationship references"
    );
    for lookup_batch in batch::chunk(&missing, SKU_LOOKUP_BATCH_SIZE) {
        let found = client.sku_refs_by_skus(lookup_batch).await?;
        resolved.extend(found.into_iter().map(|sku_ref| (sku_ref.sku, sku_ref.id)));
    }

    let metafields = build_relationship_metafields(referrers, &resolved);
    let mut errors = Vec::new();
    for metafield_batch in batch::chunk(&metafields, METAFIELD_BATCH_SIZE) {
        errors.extend(client.set_metafields(metafield_batch).await?);
    }
    Ok(errors)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> SupplierProduct {
        serde_json::from_value(json).unwrap()
    }

    fn resolved(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(sku, id)| ((*sku).to_string(), (*id).to_string()))
            .collect()
    }

    #[test]
    fn test_accessories_resolve_to_id_list() {
        let referrers = vec![record(serde_json::json!({
            "id": "A",
            "attributes": { "name": "Oven", "accessories": ["B", "C"] }
        }))];
        let ids = resolved(&[("A", "gid/1"), ("B", "gid/2"), ("C", "gid/3")]);
        let metafields = build_relationship_metafields(&referrers, &ids);
        assert_eq!(metafields.len(), 1);
        assert_eq!(metafields[0].key, "accessories");
        assert_eq!(metafields[0].owner_id.as_deref(), Some("gid/1"));
        assert_eq!(metafields[0].value, r#"["gid/2","gid/3"]"#);
    }

    #[test]
    fn test_dangling_reference_dropped_silently() {
        let referrers = vec![record(serde_json::json!({
            "id": "A",
            "attributes": { "name": "Oven", "accessories": ["GONE"] }
        }))];
        let ids = resolved(&[("A", "gid/1")]);
        let metafields = build_relationship_metafields(&referrers, &ids);
        // the list is still written, with the unresolvable entry dropped
        assert_eq!(metafields.len(), 1);
        assert_eq!(metafields[0].value, "[]");
    }

    #[test]
    fn test_unresolved_replacement_not_written() {
        let referrers = vec![record(serde_json::json!({
            "id": "A",
            "attributes": { "name": "Oven", "replacement_product_id": "GONE" }
        }))];
        let ids = resolved(&[("A", "gid/1")]);
        assert!(build_relationship_metafields(&referrers, &ids).is_empty());
    }

    #[test]
    fn test_resolved_replacement_is_single_reference() {
        let referrers = vec![record(serde_json::json!({
            "id": "A",
            "attributes": { "name": "Oven", "replacement_product_id": "B" }
        }))];
        let ids = resolved(&[("A", "gid/1"), ("B", "gid/2")]);
        let metafields = build_relationship_metafields(&referrers, &ids);
        assert_eq!(metafields.len(), 1);
        assert_eq!(metafields[0].value_type, "product_reference");
        assert_eq!(metafields[0].value, "gid/2");
    }

    #[test]
    fn test_self_reference_dropped() {
        let referrers = vec![record(serde_json::json!({
            "id": "A",
            "attributes": { "name": "Oven", "accessories": ["A", "B"], "replacement_product_id": "A" }
        }))];
        let ids = resolved(&[("A", "gid/1"), ("B", "gid/2")]);
        let metafields = build_relationship_metafields(&referrers, &ids);
        assert_eq!(metafields.len(), 1);
        assert_eq!(metafields[0].value, r#"["gid/2"]"#);
    }

    #[test]
    fn test_unresolved_referrer_contributes_nothing() {
        let referrers = vec![record(serde_json::json!({
            "id": "NOT_ON_PLATFORM",
            "attributes": { "name": "Oven", "accessories": ["B"] }
        }))];
        let ids = resolved(&[("B", "gid/2")]);
        assert!(build_relationship_metafields(&referrers, &ids).is_empty());
    }

    #[test]
    fn test_included_products_from_relationships_block() {
        let referrers = vec![record(serde_json::json!({
            "id": "A",
            "attributes": { "name": "Bundle" },
            "relationships": { "includedProducts": { "data": [{ "id": "B" }] } }
        }))];
        let ids = resolved(&[("A", "gid/1"), ("B", "gid/2")]);
        let metafields = build_relationship_metafields(&referrers, &ids);
        assert_eq!(metafields.len(), 1);
        assert_eq!(metafields[0].key, "includedProducts");
        assert_eq!(metafields[0].value, r#"["gid/2"]"#);
    }
}
