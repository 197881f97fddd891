//! Metafield input types.

use serde::Serialize;

/// Input for `metafieldsSet` and for the `metafields` list of
/// `productCreate`.
///
/// `owner_id` is set for standalone `metafieldsSet` calls and omitted when
/// the input is nested under a product being created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetafieldInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub namespace: String,
    pub key: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: String,
}

impl MetafieldInput {
    /// A metafield in the `product` namespace without an owner.
    #[must_use]
    pub fn product(key: &str, value_type: &str, value: String) -> Self {
        Self {
            owner_id: None,
            namespace: "product".to_string(),
            key: key.to_string(),
            value_type: value_type.to_string(),
            value,
        }
    }

    /// Attach an owner id for a standalone `metafieldsSet` call.
    #[must_use]
    pub fn with_owner(mut self, owner_id: &str) -> Self {
        self.owner_id = Some(owner_id.to_string());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_omitted_when_nested() {
        let input = MetafieldInput::product("brand", "single_line_text_field", "Acme".into());
        let value = serde_json::to_value(&input).unwrap();
        assert!(value.get("ownerId").is_none());
        assert_eq!(value["type"], "single_line_text_field");
    }

    #[test]
    fn test_owner_serialized_when_set() {
        let input = MetafieldInput::product("brand", "single_line_text_field", "Acme".into())
            .with_owner("gid://shopify/Product/1");
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["ownerId"], "gid://shopify/Product/1");
    }
}
