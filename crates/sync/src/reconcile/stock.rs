//! Hourly stock delta planning.

use std::collections::HashMap;

use skubridge_core::{StockChange, StockLevel, SupplierProduct};

/// Compute relative inventory adjustments from feed availability against
/// current platform stock. Zero deltas and unmatched SKUs are skipped.
#[must_use]
pub fn stock_changes(
    batch: &[SupplierProduct],
    levels: &[StockLevel],
    location_id: &str,
) -> Vec<StockChange> {
    let by_sku: HashMap<&str, &StockLevel> =
        levels.iter().map(|level| (level.sku.as_str(), level)).collect();

    batch
        .iter()
        .filter_map(|record| {
            let level = by_sku.get(record.id.as_str())?;
            let delta = record.attributes.availability - level.inventory_quantity;
            if delta == 0 {
                return None;
            }
            Some(StockChange {
                delta,
                inventory_item_id: level.inventory_item_id.clone(),
                location_id: location_id.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(sku: &str, availability: i64) -> SupplierProduct {
        serde_json::from_value(serde_json::json!({
            "id": sku,
            "attributes": { "name": "Oven", "availability": availability }
        }))
        .unwrap()
    }

    fn level(sku: &str, quantity: i64) -> StockLevel {
        StockLevel {
            product_id: format!("gid://shopify/Product/{sku}"),
            sku: sku.to_string(),
            inventory_quantity: quantity,
            inventory_item_id: format!("gid://shopify/InventoryItem/{sku}"),
        }
    }

    const LOCATION: &str = "gid://shopify/Location/1";

    #[test]
    fn test_equal_quantities_produce_no_change() {
        let changes = stock_changes(&[record("A", 5)], &[level("A", 5)], LOCATION);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_positive_and_negative_deltas() {
        let changes = stock_changes(
            &[record("A", 8), record("B", 2)],
            &[level("A", 5), level("B", 6)],
            LOCATION,
        );
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].delta, 3);
        assert_eq!(changes[1].delta, -4);
        assert_eq!(changes[0].location_id, LOCATION);
    }

    #[test]
    fn test_unmatched_sku_skipped() {
        let changes = stock_changes(&[record("MISSING", 4)], &[level("A", 5)], LOCATION);
        assert!(changes.is_empty());
    }
}
