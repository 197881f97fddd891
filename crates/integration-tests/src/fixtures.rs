//! Shared fixture builders for scenario tests.

use serde_json::json;
use skubridge_core::{
    MediaImage, PlatformProduct, PlatformVariant, ProductStatus, SupplierProduct,
};

/// A realistic feed record; callers override fields through the JSON
/// before deserializing when they need variations.
#[must_use]
pub fn feed_record(sku: &str) -> SupplierProduct {
    feed_record_json(sku, json!({}))
}

/// A feed record with extra attribute fields merged in.
///
/// # Panics
///
/// Panics when `overrides` is not a JSON object; fixtures are built from
/// literals in tests.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn feed_record_json(sku: &str, overrides: serde_json::Value) -> SupplierProduct {
    let mut attributes = json!({
        "name": format!("Convection Oven {sku}"),
        "description": "<p>Stainless steel, 10 trays.</p>",
        "is_old": false,
        "price": { "catalog": 1250.0, "promo": 999.0 },
        "availability": 5,
        "weight": 42.5,
        "weight_unit": "kg",
        "media": {
            "images": [
                { "big": format!("https://cdn.supplier.example/images/{sku}_front.jpg") }
            ],
            "documents": [
                { "url": format!("https://cdn.supplier.example/docs/{sku}_manual.pdf") }
            ]
        },
        "brand": "Acme",
        "electric_power_kw": 3.5
    });
    if let (Some(target), Some(extra)) = (attributes.as_object_mut(), overrides.as_object()) {
        for (key, value) in extra {
            target.insert(key.clone(), value.clone());
        }
    }
    serde_json::from_value(json!({ "id": sku, "attributes": attributes })).unwrap()
}

/// A platform product matching what the SKU disjunction query returns
/// for an already-synced record.
#[must_use]
pub fn platform_product(sku: &str, status: ProductStatus) -> PlatformProduct {
    PlatformProduct {
        id: format!("gid://shopify/Product/{sku}"),
        title: format!("Convection Oven {sku}"),
        status,
        media: vec![MediaImage {
            id: format!("gid://shopify/MediaImage/{sku}"),
            url: format!("https://cdn.shopify.example/files/{sku}_front.jpg"),
        }],
        variant: PlatformVariant {
            id: format!("gid://shopify/ProductVariant/{sku}"),
            sku: sku.to_string(),
            price: Some(rust_decimal::Decimal::new(9990, 1)),
            compare_at_price: Some(rust_decimal::Decimal::new(12500, 1)),
            inventory_quantity: Some(5),
            inventory_item_id: Some(format!("gid://shopify/InventoryItem/{sku}")),
        },
    }
}
