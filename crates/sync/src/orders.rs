//! Storefront order relay.
//!
//! Paid orders arrive as platform webhooks and are re-shaped into the
//! supplier's order schema before upload. The webhook payload is decoded
//! leniently; storefronts omit optional address fields freely and the
//! supplier expects empty strings in their place.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::error::SyncError;
use crate::pipeline::SyncService;

/// The slice of a platform order webhook the relay reads.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookOrder {
    /// Order display name, e.g. `#1001`. Becomes the supplier reference.
    pub name: String,
    #[serde(default)]
    pub note: Option<String>,
    pub updated_at: String,
    #[serde(default)]
    pub financial_status: Option<String>,
    #[serde(default)]
    pub line_items: Vec<OrderLineItem>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineItem {
    #[serde(default)]
    pub sku: Option<String>,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShippingAddress {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl WebhookOrder {
    /// Only paid orders are relayed; everything else stays on the
    /// storefront until payment settles.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.financial_status.as_deref() == Some("paid")
    }
}

/// Re-shape a webhook order into the supplier's order schema.
///
/// Line items reference supplier products by SKU. The delivery address is
/// always typed `HOME` with company delivery enabled, matching how the
/// supplier's own shop submits orders.
#[must_use]
pub fn supplier_order_payload(order: &WebhookOrder) -> Value {
    let items: Vec<Value> = order
        .line_items
        .iter()
        .map(|item| {
            json!({
                "id": item.sku.as_deref().unwrap_or_default(),
                "type": "products",
                "qty": item.quantity,
            })
        })
        .collect();

    let address = order.shipping_address.clone().unwrap_or_default();
    let field = |value: Option<String>| value.unwrap_or_default();

    json!({
        "comments": order.note.as_deref().unwrap_or_default(),
        "reference": order.name,
        "is_draft": false,
        "items": items,
        "delivery_address": {
            "date": order.updated_at,
            "type": "HOME",
            "address": {
                "company": field(address.company),
                "address": field(address.address1),
                "address2": field(address.address2),
                "postal_code": field(address.zip),
                "city": field(address.city),
                "country": field(address.country),
                "contact_name": field(address.name),
                "telephone_number": field(address.phone),
                "deliverToCompanyAddress": true,
            },
        },
    })
}

impl SyncService {
    /// Upload a paid storefront order to the supplier.
    ///
    /// # Errors
    ///
    /// Returns an error when supplier login fails or the supplier rejects
    /// the order.
    #[instrument(skip(self, order), fields(store = %self.store(), order = %order.name))]
    pub async fn relay_order(&self, order: &WebhookOrder) -> Result<Value, SyncError> {
        let token = self.supplier().login().await?;
        let payload = supplier_order_payload(order);
        let response = self.supplier().upload_order(&token, &payload).await?;
        info!(store = %self.store(), order = %order.name, "order relayed");
        Ok(response)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_order() -> WebhookOrder {
        serde_json::from_value(json!({
            "name": "#1042",
            "note": "ring the back bell",
            "updated_at": "2024-03-01T09:30:00+01:00",
            "financial_status": "paid",
            "line_items": [
                { "sku": "DT-1000", "quantity": 2 },
                { "sku": "DT-2000", "quantity": 1 }
            ],
            "shipping_address": {
                "company": "Kitchen GmbH",
                "address1": "Hauptstrasse 1",
                "zip": "10115",
                "city": "Berlin",
                "country": "Germany",
                "name": "A. Koch",
                "phone": "+49 30 1234567"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_paid_gate() {
        let mut order = sample_order();
        assert!(order.is_paid());
        order.financial_status = Some("pending".to_string());
        assert!(!order.is_paid());
        order.financial_status = None;
        assert!(!order.is_paid());
    }

    #[test]
    fn test_payload_shape() {
        let payload = supplier_order_payload(&sample_order());
        assert_eq!(payload["reference"], "#1042");
        assert_eq!(payload["is_draft"], false);
        assert_eq!(payload["items"][0]["id"], "DT-1000");
        assert_eq!(payload["items"][0]["type"], "products");
        assert_eq!(payload["items"][1]["qty"], 1);
        assert_eq!(payload["delivery_address"]["type"], "HOME");
        let address = &payload["delivery_address"]["address"];
        assert_eq!(address["postal_code"], "10115");
        assert_eq!(address["contact_name"], "A. Koch");
        assert_eq!(address["deliverToCompanyAddress"], true);
        // address2 was absent on the webhook and defaults to empty
        assert_eq!(address["address2"], "");
    }

    #[test]
    fn test_missing_address_defaults_empty() {
        let order = WebhookOrder {
            name: "#1".to_string(),
            note: None,
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            financial_status: Some("paid".to_string()),
            line_items: vec![OrderLineItem { sku: None, quantity: 1 }],
            shipping_address: None,
        };
        let payload = supplier_order_payload(&order);
        assert_eq!(payload["comments"], "");
        assert_eq!(payload["items"][0]["id"], "");
        assert_eq!(payload["delivery_address"]["address"]["city"], "");
    }
}
