//! Feed attributes through the store's metafield table.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use skubridge_core::PlatformFile;
use skubridge_integration_tests::fixtures::feed_record_json;
use skubridge_sync::metafields::{document_metafields, encode_product_metafields};
use skubridge_sync::registry;

#[test]
fn test_typed_values_per_table() {
    let profile = registry::profile("DIAMOND").unwrap();
    let product = feed_record_json(
        "DT-1000",
        json!({
            "is_old": true,
            "is_new": 1,
            "supplier_delivery_delay": 14,
            "volume_m3": 0.85,
            "popup_info": "  Aktion  ",
            "eprel": { "label": "https://eprel.example/123" }
        }),
    );

    let metafields = encode_product_metafields(profile, &product);
    let by_key = |key: &str| metafields.iter().find(|m| m.key == key).unwrap();

    // is_old comes from the typed field, not the extra map
    let is_old = by_key("is_old");
    assert_eq!(is_old.value_type, "boolean");
    assert_eq!(is_old.value, "true");

    // numeric truthiness for boolean columns
    assert_eq!(by_key("is_new").value, "true");

    assert_eq!(by_key("supplier_delivery_delay").value_type, "number_integer");
    assert_eq!(by_key("supplier_delivery_delay").value, "14");

    assert_eq!(by_key("volume_m3").value_type, "number_decimal");

    // single-line text is trimmed
    assert_eq!(by_key("popup_info").value, "Aktion");

    // json columns are re-serialized
    let eprel: serde_json::Value = serde_json::from_str(&by_key("eprel").value).unwrap();
    assert_eq!(eprel["label"], "https://eprel.example/123");
}

#[test]
fn test_absent_and_empty_attributes_are_skipped() {
    let profile = registry::profile("DIAMOND").unwrap();
    let product = feed_record_json("DT-1000", json!({ "restock_info": "" }));

    let metafields = encode_product_metafields(profile, &product);

    assert!(!metafields.iter().any(|m| m.key == "restock_info"));
    // brand is set by the fixture and survives
    assert!(metafields.iter().any(|m| m.key == "brand"));
    // kcal_power never appeared in the feed record
    assert!(!metafields.iter().any(|m| m.key == "kcal_power"));
}

#[test]
fn test_document_metafields_link_uploaded_files() {
    let product = feed_record_json(
        "DT-1000",
        json!({
            "media": {
                "documents": [
                    { "url": "https://cdn.supplier.example/docs/DT-1000_manual.pdf" }
                ],
                "spare-parts": [
                    { "url": "https://cdn.supplier.example/docs/DT-1000_parts.pdf" }
                ]
            }
        }),
    );
    let files = [
        PlatformFile {
            id: "gid://shopify/GenericFile/1".to_string(),
            alt: Some("Uploaded DIAMOND File: DT-1000_manual.pdf".to_string()),
        },
        PlatformFile {
            id: "gid://shopify/GenericFile/2".to_string(),
            alt: Some("Uploaded DIAMOND File: DT-1000_parts.pdf".to_string()),
        },
        PlatformFile {
            id: "gid://shopify/GenericFile/3".to_string(),
            alt: Some("Uploaded DIAMOND File: other-product.pdf".to_string()),
        },
    ];

    let metafields = document_metafields("DIAMOND", &product, &files);
    let by_key = |key: &str| metafields.iter().find(|m| m.key == key).unwrap();

    let documents = by_key("documents");
    assert_eq!(documents.value_type, "list.file_reference");
    assert_eq!(documents.value, "[\"gid://shopify/GenericFile/1\"]");

    let spare_parts = by_key("spare_parts");
    assert_eq!(spare_parts.value, "[\"gid://shopify/GenericFile/2\"]");

    // raw URL mirrors for the storefront
    let json_documents: serde_json::Value =
        serde_json::from_str(&by_key("json_documents").value).unwrap();
    assert_eq!(
        json_documents[0]["url"],
        "https://cdn.supplier.example/docs/DT-1000_manual.pdf"
    );
    assert!(metafields.iter().any(|m| m.key == "json_spare_parts"));
}

#[test]
fn test_no_documents_no_metafields() {
    let product = feed_record_json("DT-1000", json!({ "media": {} }));
    let metafields = document_metafields("DIAMOND", &product, &[]);
    assert!(metafields.is_empty());
}
