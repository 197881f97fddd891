//! Commerce-platform (Shopify Admin) product model.
//!
//! These types mirror the slices of the Admin API this system actually
//! queries. Every product here follows the single-variant model: the
//! variant's SKU is the supplier product id, and there is no other stored
//! mapping between the two systems.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product status in the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    /// Product is visible on the storefront.
    Active,
    /// Product is not visible; "disable" always means a transition here.
    Draft,
    /// Product is hidden/archived.
    Archived,
}

/// A platform product as returned by the SKU disjunction query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformProduct {
    /// Platform-assigned opaque identifier (`gid://shopify/Product/...`).
    pub id: String,
    pub title: String,
    pub status: ProductStatus,
    /// Image media nodes currently attached to the product.
    #[serde(default)]
    pub media: Vec<MediaImage>,
    /// The single variant; its SKU is the supplier product id.
    pub variant: PlatformVariant,
}

/// An image media node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaImage {
    pub id: String,
    pub url: String,
}

/// The product's single variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformVariant {
    pub id: String,
    pub sku: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub compare_at_price: Option<Decimal>,
    /// Present only when the stock view of the query is requested.
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    #[serde(default)]
    pub inventory_item_id: Option<String>,
}

/// A platform id ↔ SKU pair, the unit of relationship resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuRef {
    pub id: String,
    pub sku: String,
}

/// The stock view of a product, as returned by the hourly inventory query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub product_id: String,
    pub sku: String,
    /// On-hand quantity at the tracked location.
    pub inventory_quantity: i64,
    pub inventory_item_id: String,
}

/// One relative inventory adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockChange {
    pub delta: i64,
    pub inventory_item_id: String,
    pub location_id: String,
}

/// A sales channel the store publishes to.
#[derive(Debug, Clone, Deserialize)]
pub struct Publication {
    pub id: String,
    pub name: String,
}

/// A file already present on the platform, looked up by filename.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformFile {
    pub id: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// A staged-upload target: temporary URL plus form parameters, and the
/// resource URL handed to `fileCreate` once the bytes are posted.
#[derive(Debug, Clone)]
pub struct StagedUploadTarget {
    pub url: String,
    pub resource_url: String,
    pub parameters: Vec<(String, String)>,
}

impl PlatformProduct {
    /// Whether the product is already disabled.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.status == ProductStatus::Draft
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        let status: ProductStatus = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(status, ProductStatus::Active);
        assert_eq!(serde_json::to_string(&ProductStatus::Draft).unwrap(), "\"DRAFT\"");
    }

    #[test]
    fn test_stock_change_serializes_camel_case() {
        let change = StockChange {
            delta: 3,
            inventory_item_id: "gid://shopify/InventoryItem/1".to_string(),
            location_id: "gid://shopify/Location/2".to_string(),
        };
        let value = serde_json::to_value(&change).unwrap();
        assert_eq!(value["inventoryItemId"], "gid://shopify/InventoryItem/1");
        assert_eq!(value["locationId"], "gid://shopify/Location/2");
        assert_eq!(value["delta"], 3);
    }
}
