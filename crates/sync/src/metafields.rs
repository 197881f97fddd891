//! Metafield encoding from supplier attributes.
//!
//! The storefront theme reads ~45 product metafields in the `product`
//! namespace. Their keys and platform value types come from the store
//! profile ([`crate::registry`]); the values come from the feed record's
//! scalar attributes. Null and empty-string attributes are skipped, so a
//! product only carries the metafields its feed record actually filled.

use serde_json::Value;
use skubridge_core::{MetafieldInput, PlatformFile, SupplierFile, SupplierProduct, media};

use crate::registry::{MetafieldValueType, StoreProfile};

/// Encode the profile's scalar metafields for one feed record.
#[must_use]
pub fn encode_product_metafields(
    profile: &StoreProfile,
    product: &SupplierProduct,
) -> Vec<MetafieldInput> {
    let is_old = Value::Bool(product.attributes.is_old);
    let mut metafields = Vec::new();

    for spec in profile.metafields {
        // is_old is typed on the record; everything else sits in the
        // flattened attribute map
        let value = if spec.key == "is_old" {
            Some(&is_old)
        } else {
            product.attributes.extra.get(spec.key)
        };
        let Some(value) = value else { continue };
        if value.is_null() || value.as_str().is_some_and(str::is_empty) {
            continue;
        }
        if let Some(encoded) = encode_value(value, spec.value_type) {
            metafields.push(MetafieldInput::product(
                spec.key,
                spec.value_type.as_str(),
                encoded,
            ));
        }
    }

    metafields
}

/// File-reference and raw-JSON metafields for the record's documents,
/// given the platform files already uploaded for this store.
///
/// Files are joined by alt text: a supplier document matches the platform
/// file whose alt is `Uploaded {store} File: {sanitized name}`. Documents
/// without a match are left out of the reference list but still appear in
/// the raw JSON copy the theme renders links from.
#[must_use]
pub fn document_metafields(
    store: &str,
    product: &SupplierProduct,
    product_files: &[PlatformFile],
) -> Vec<MetafieldInput> {
    let mut metafields = Vec::new();

    let documents = &product.attributes.media.documents;
    if !documents.is_empty() {
        let ids = matched_file_ids(store, documents, product_files);
        metafields.push(MetafieldInput::product(
            "documents",
            "list.file_reference",
            Value::from(ids).to_string(),
        ));
        metafields.push(MetafieldInput::product(
            "json_documents",
            "json",
            raw_json(documents),
        ));
    }

    let spare_parts = &product.attributes.media.spare_parts;
    if !spare_parts.is_empty() {
        let ids = matched_file_ids(store, spare_parts, product_files);
        metafields.push(MetafieldInput::product(
            "spare_parts",
            "list.file_reference",
            Value::from(ids).to_string(),
        ));
        metafields.push(MetafieldInput::product(
            "json_spare_parts",
            "json",
            raw_json(spare_parts),
        ));
    }

    metafields
}

fn matched_file_ids(
    store: &str,
    files: &[SupplierFile],
    product_files: &[PlatformFile],
) -> Vec<String> {
    let prefix = format!("Uploaded {store} File: ");
    files
        .iter()
        .filter_map(|file| {
            let name = media::sanitize_file_name(&file.url);
            product_files
                .iter()
                .find(|candidate| {
                    candidate
                        .alt
                        .as_deref()
                        .and_then(|alt| alt.strip_prefix(&prefix))
                        .is_some_and(|alt_name| alt_name == name)
                })
                .map(|candidate| candidate.id.clone())
        })
        .collect()
}

fn raw_json(files: &[SupplierFile]) -> String {
    let urls: Vec<Value> = files
        .iter()
        .map(|file| serde_json::json!({ "url": file.url }))
        .collect();
    Value::from(urls).to_string()
}

#[allow(clippy::cast_possible_truncation)]
fn encode_value(value: &Value, value_type: MetafieldValueType) -> Option<String> {
    match value_type {
        MetafieldValueType::SingleLineText => match value {
            Value::String(s) => Some(s.trim().to_string()),
            other => Some(other.to_string()),
        },
        MetafieldValueType::MultiLineText => match value {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        },
        MetafieldValueType::Boolean => match value {
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some((n.as_f64().unwrap_or(0.0) != 0.0).to_string()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        },
        MetafieldValueType::Integer => match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .map(|i| i.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(i64::from(*b).to_string()),
            _ => None,
        },
        MetafieldValueType::Decimal => match value {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        },
        MetafieldValueType::Json => Some(value.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::registry;

    fn record(json: Value) -> SupplierProduct {
        serde_json::from_value(json).unwrap()
    }

    fn diamond() -> &'static StoreProfile {
        registry::profile("DIAMOND").unwrap()
    }

    #[test]
    fn test_null_and_empty_attributes_skipped() {
        let product = record(serde_json::json!({
            "id": "A",
            "attributes": {
                "name": "Oven",
                "brand": "",
                "cusref": null,
                "eancod": "5410000123456"
            }
        }));
        let metafields = encode_product_metafields(diamond(), &product);
        assert!(!metafields.iter().any(|m| m.key == "brand"));
        assert!(!metafields.iter().any(|m| m.key == "cusref"));
        assert!(metafields.iter().any(|m| m.key == "eancod"));
    }

    #[test]
    fn test_is_old_encoded_from_typed_field() {
        let product = record(serde_json::json!({
            "id": "A",
            "attributes": { "name": "Oven", "is_old": true }
        }));
        let metafields = encode_product_metafields(diamond(), &product);
        let is_old = metafields.iter().find(|m| m.key == "is_old").unwrap();
        assert_eq!(is_old.value, "true");
        assert_eq!(is_old.value_type, "boolean");
    }

    #[test]
    fn test_value_types_follow_profile() {
        let product = record(serde_json::json!({
            "id": "A",
            "attributes": {
                "name": "Oven",
                "kcal_power": 3500,
                "electric_power_kw": 3.5,
                "eprel": { "fiche": "https://eprel.example/123" }
            }
        }));
        let metafields = encode_product_metafields(diamond(), &product);
        let kcal = metafields.iter().find(|m| m.key == "kcal_power").unwrap();
        assert_eq!(kcal.value, "3500");
        assert_eq!(kcal.value_type, "number_integer");
        let kw = metafields.iter().find(|m| m.key == "electric_power_kw").unwrap();
        assert_eq!(kw.value, "3.5");
        assert_eq!(kw.value_type, "number_decimal");
        let eprel = metafields.iter().find(|m| m.key == "eprel").unwrap();
        assert_eq!(eprel.value_type, "json");
        assert!(eprel.value.contains("eprel.example"));
    }

    #[test]
    fn test_document_metafields_join_by_alt() {
        let product = record(serde_json::json!({
            "id": "A",
            "attributes": {
                "name": "Oven",
                "media": {
                    "documents": [
                        { "url": "https://cdn.supplier.example/docs/manual%20de.pdf" },
                        { "url": "https://cdn.supplier.example/docs/unmatched.pdf" }
                    ]
                }
            }
        }));
        let files = vec![PlatformFile {
            id: "gid://shopify/GenericFile/9".to_string(),
            alt: Some("Uploaded DIAMOND File: manual_20de.pdf".to_string()),
        }];

        let metafields = document_metafields("DIAMOND", &product, &files);
        let refs = metafields.iter().find(|m| m.key == "documents").unwrap();
        assert_eq!(refs.value, r#"["gid://shopify/GenericFile/9"]"#);
        let json = metafields.iter().find(|m| m.key == "json_documents").unwrap();
        assert!(json.value.contains("unmatched.pdf"));
        assert!(!metafields.iter().any(|m| m.key == "spare_parts"));
    }
}
