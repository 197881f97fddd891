//! Supplier feed product model.
//!
//! The feed is a JSON:API-shaped document: each record has an `id` (the
//! supplier SKU, which doubles as the platform variant SKU), a flat
//! `attributes` object, and an optional `relationships` block for bundle
//! inclusion. Records are read-only snapshots; nothing here is mutated
//! locally.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::relationship::{RelationshipEdge, RelationshipKind};

/// Supplier SKU suffixes denoting liquidation/duplicate records that are
/// deliberately excluded from product creation.
pub const EXCLUDED_SKU_SUFFIXES: &[&str] = &["LIQ", "2EME"];

/// Top-level feed document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierFeed {
    #[serde(default)]
    pub data: Vec<SupplierProduct>,
}

/// One product record from the supplier feed.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierProduct {
    /// Supplier SKU; the sole cross-system join key.
    pub id: String,
    pub attributes: SupplierAttributes,
    #[serde(default)]
    pub relationships: Option<SupplierRelationships>,
}

/// Flat product attributes.
///
/// Only the fields the sync logic reads are typed; the remaining ~40 scalar
/// attributes map 1:1 to platform metafields and are captured in `extra` for
/// the metafield encoder.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierAttributes {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Supplier's own discontinued flag.
    #[serde(default)]
    pub is_old: bool,
    #[serde(default)]
    pub price: SupplierPrice,
    /// Stock count at the supplier.
    #[serde(default)]
    pub availability: i64,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub weight_unit: Option<String>,
    #[serde(default)]
    pub media: SupplierMedia,
    /// SKU references to accessory products.
    #[serde(default)]
    pub accessories: Vec<String>,
    /// SKU reference to the product superseding this one, if any.
    #[serde(default)]
    pub replacement_product_id: Option<String>,
    /// Remaining scalar attributes, metafield-encoded per store profile.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Catalog and promotional prices.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SupplierPrice {
    #[serde(default)]
    pub catalog: Option<Decimal>,
    #[serde(default)]
    pub promo: Option<Decimal>,
}

impl SupplierPrice {
    /// Catalog price, treating an absent value as zero (feed records omit
    /// prices for some accessories).
    #[must_use]
    pub fn catalog_or_zero(&self) -> Decimal {
        self.catalog.unwrap_or_default()
    }
}

/// Media references attached to a product.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierMedia {
    #[serde(default)]
    pub images: Vec<SupplierImage>,
    #[serde(default)]
    pub videos: Vec<SupplierFile>,
    #[serde(default)]
    pub documents: Vec<SupplierFile>,
    #[serde(default, rename = "spare-parts")]
    pub spare_parts: Vec<SupplierFile>,
}

/// One image in its size variants; only `big` is synced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierImage {
    #[serde(default)]
    pub big: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
}

/// A non-image media file (video, document, spare-parts sheet).
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierFile {
    pub url: String,
}

/// JSON:API relationships block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierRelationships {
    #[serde(default, rename = "includedProducts")]
    pub included_products: Option<ResourceList>,
}

/// A list of resource references.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub data: Vec<ResourceRef>,
}

/// A single resource reference (the `id` is a supplier SKU).
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    pub id: String,
}

impl SupplierProduct {
    /// URLs of the full-size images, skipping records without a `big` variant.
    #[must_use]
    pub fn big_image_urls(&self) -> Vec<&str> {
        self.attributes
            .media
            .images
            .iter()
            .filter_map(|image| image.big.as_deref())
            .collect()
    }

    /// SKUs of bundle-included products.
    #[must_use]
    pub fn included_product_skus(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.included_products.as_ref())
            .map(|list| list.data.iter().map(|r| r.id.as_str()).collect())
            .unwrap_or_default()
    }

    /// Whether this record references any other product.
    #[must_use]
    pub fn has_relationships(&self) -> bool {
        !self.attributes.accessories.is_empty()
            || !self.included_product_skus().is_empty()
            || self.attributes.replacement_product_id.is_some()
    }

    /// All outgoing relationship edges of this record.
    #[must_use]
    pub fn relationship_edges(&self) -> Vec<RelationshipEdge> {
        let mut edges = Vec::new();
        for sku in &self.attributes.accessories {
            edges.push(RelationshipEdge {
                from_sku: self.id.clone(),
                to_sku: sku.clone(),
                kind: RelationshipKind::Accessory,
            });
        }
        for sku in self.included_product_skus() {
            edges.push(RelationshipEdge {
                from_sku: self.id.clone(),
                to_sku: sku.to_string(),
                kind: RelationshipKind::IncludedProduct,
            });
        }
        if let Some(sku) = &self.attributes.replacement_product_id {
            edges.push(RelationshipEdge {
                from_sku: self.id.clone(),
                to_sku: sku.clone(),
                kind: RelationshipKind::Replacement,
            });
        }
        edges
    }

    /// Whether the SKU carries a liquidation/duplicate suffix.
    #[must_use]
    pub fn has_excluded_suffix(&self) -> bool {
        EXCLUDED_SKU_SUFFIXES
            .iter()
            .any(|suffix| self.id.ends_with(suffix))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn feed_record(json: serde_json::Value) -> SupplierProduct {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let product = feed_record(serde_json::json!({
            "id": "ABC123",
            "attributes": { "name": "Convection Oven" }
        }));
        assert_eq!(product.id, "ABC123");
        assert!(!product.attributes.is_old);
        assert_eq!(product.attributes.availability, 0);
        assert!(product.big_image_urls().is_empty());
    }

    #[test]
    fn test_extra_attributes_captured() {
        let product = feed_record(serde_json::json!({
            "id": "ABC123",
            "attributes": {
                "name": "Convection Oven",
                "brand": "Acme",
                "electric_power_kw": 3.5
            }
        }));
        assert_eq!(
            product.attributes.extra.get("brand").unwrap(),
            &serde_json::json!("Acme")
        );
        assert!(product.attributes.extra.contains_key("electric_power_kw"));
    }

    #[test]
    fn test_price_accepts_numbers_and_is_optional() {
        let product = feed_record(serde_json::json!({
            "id": "ABC123",
            "attributes": {
                "name": "Oven",
                "price": { "catalog": 1250, "promo": 999.5 }
            }
        }));
        assert_eq!(
            product.attributes.price.catalog_or_zero(),
            Decimal::from(1250)
        );
        assert_eq!(
            product.attributes.price.promo.unwrap(),
            Decimal::new(9995, 1)
        );
    }

    #[test]
    fn test_relationship_edges() {
        let product = feed_record(serde_json::json!({
            "id": "A",
            "attributes": {
                "name": "Bundle",
                "accessories": ["B"],
                "replacement_product_id": "D"
            },
            "relationships": {
                "includedProducts": { "data": [{ "id": "C" }] }
            }
        }));
        let edges = product.relationship_edges();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].kind, RelationshipKind::Accessory);
        assert_eq!(edges[0].to_sku, "B");
        assert_eq!(edges[1].kind, RelationshipKind::IncludedProduct);
        assert_eq!(edges[2].kind, RelationshipKind::Replacement);
        assert!(product.has_relationships());
    }

    #[test]
    fn test_excluded_suffixes() {
        let liq = feed_record(serde_json::json!({
            "id": "ABC123LIQ",
            "attributes": { "name": "Dup" }
        }));
        let second = feed_record(serde_json::json!({
            "id": "ABC1232EME",
            "attributes": { "name": "Dup" }
        }));
        let normal = feed_record(serde_json::json!({
            "id": "ABC123",
            "attributes": { "name": "Ok" }
        }));
        assert!(liq.has_excluded_suffix());
        assert!(second.has_excluded_suffix());
        assert!(!normal.has_excluded_suffix());
    }

    #[test]
    fn test_spare_parts_key_renamed() {
        let product = feed_record(serde_json::json!({
            "id": "A",
            "attributes": {
                "name": "Oven",
                "media": { "spare-parts": [{ "url": "https://x/parts.pdf" }] }
            }
        }));
        assert_eq!(product.attributes.media.spare_parts.len(), 1);
    }
}
