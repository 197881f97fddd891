//! Inventory mutations.
//!
//! Stock is always adjusted relatively (`inventoryAdjustQuantities` with
//! per-item deltas), never set absolutely, so a concurrent manual change
//! on the platform shifts the target rather than being overwritten.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::json;
use skubridge_core::StockChange;
use tracing::instrument;

use super::{PlatformClient, PlatformError, fail_on_user_errors};

const INVENTORY_ADJUST_MUTATION: &str = r"
    mutation inventoryAdjustQuantities($input: InventoryAdjustQuantitiesInput!) {
      inventoryAdjustQuantities(input: $input) {
        userErrors {
          field
          message
        }
        inventoryAdjustmentGroup {
          createdAt
        }
      }
    }
";

const INVENTORY_ITEM_UPDATE_MUTATION: &str = r"
    mutation inventoryItemUpdate($id: ID!, $input: InventoryItemInput!) {
      inventoryItemUpdate(id: $id, input: $input) {
        inventoryItem {
          id
        }
        userErrors {
          message
        }
      }
    }
";

impl PlatformClient {
    /// Apply a batch of relative stock adjustments in one mutation.
    ///
    /// The adjustment is recorded with reason `received` against the
    /// `available` quantity, matching how stocktake deltas are booked.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` when the mutation is rejected.
    #[instrument(skip(self, changes), fields(changes = changes.len()))]
    pub async fn adjust_inventory(&self, changes: &[StockChange]) -> Result<(), PlatformError> {
        let variables = json!({
            "input": {
                "changes": changes,
                "reason": "received",
                "name": "available",
            }
        });
        let data = self.execute(INVENTORY_ADJUST_MUTATION, variables).await?;
        fail_on_user_errors(&data["inventoryAdjustQuantities"])
    }

    /// Set an inventory item's shipping weight in kilograms.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` when the mutation is rejected.
    #[instrument(skip(self), fields(inventory_item_id = %inventory_item_id))]
    pub async fn set_item_weight_kg(
        &self,
        inventory_item_id: &str,
        weight: Decimal,
    ) -> Result<(), PlatformError> {
        // The measurement value is a GraphQL Float, not a Money string
        let variables = json!({
            "id": inventory_item_id,
            "input": {
                "measurement": {
                    "weight": { "unit": "KILOGRAMS", "value": weight.to_f64().unwrap_or(0.0) }
                }
            }
        });
        let data = self.execute(INVENTORY_ITEM_UPDATE_MUTATION, variables).await?;
        fail_on_user_errors(&data["inventoryItemUpdate"])
    }
}
