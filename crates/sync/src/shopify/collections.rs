//! Smart-collection creation and navigation menu management.
//!
//! One collection exists per range/subrange pair. Membership is rule
//! based: both the range and subrange metafields must equal the
//! collection's pair, so products fall in and out of collections as
//! their metafields change, without explicit collection writes.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use super::{GraphQLError, PlatformClient, PlatformError, fail_on_user_errors};

const COLLECTION_CREATE_MUTATION: &str = r"
    mutation collectionCreate($input: CollectionInput!) {
      collectionCreate(input: $input) {
        collection {
          id
          title
          handle
        }
        userErrors {
          field
          message
        }
      }
    }
";

const COLLECTION_PAGE_QUERY: &str = r"
    query getCollections($first: Int!, $after: String) {
      collections(first: $first, after: $after) {
        pageInfo {
          endCursor
          hasNextPage
        }
        nodes {
          id
          title
          handle
        }
      }
    }
";

const COLLECTION_UPDATE_MUTATION: &str = r"
    mutation collectionUpdate($input: CollectionInput!) {
      collectionUpdate(input: $input) {
        collection {
          id
        }
        userErrors {
          field
          message
        }
      }
    }
";

const MENU_CREATE_MUTATION: &str = r"
    mutation menuCreate($title: String!, $handle: String!, $items: [MenuItemCreateInput!]!) {
      menuCreate(title: $title, handle: $handle, items: $items) {
        menu {
          id
          handle
        }
        userErrors {
          field
          message
        }
      }
    }
";

/// Derive a URL handle from a collection title the way the storefront
/// does: lowercased, letters/digits/`+` kept, everything else dropped,
/// whitespace runs collapsed to single hyphens.
#[must_use]
pub fn handleize(title: &str) -> String {
    let mut handle = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for ch in title.trim().chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
        } else if ch.is_alphabetic() || ch.is_ascii_digit() || ch == '+' {
            if pending_hyphen && !handle.is_empty() {
                handle.push('-');
            }
            pending_hyphen = false;
            handle.extend(ch.to_lowercase());
        }
    }
    handle
}

/// A collection as returned by creation or pagination.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedCollection {
    pub id: String,
    pub title: String,
    pub handle: String,
}

/// One entry of the storefront navigation menu. Top-level entries are
/// range headers; their children point at range/subrange collections.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemInput {
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    pub items: Vec<MenuItemInput>,
}

impl MenuItemInput {
    /// A range header with no target of its own.
    #[must_use]
    pub fn frontpage(title: &str, items: Vec<MenuItemInput>) -> Self {
        Self {
            title: title.to_string(),
            item_type: "FRONTPAGE",
            resource_id: None,
            items,
        }
    }

    /// A leaf entry linking to a collection.
    #[must_use]
    pub fn collection(title: &str, collection_id: &str) -> Self {
        Self {
            title: title.to_string(),
            item_type: "COLLECTION",
            resource_id: Some(collection_id.to_string()),
            items: Vec::new(),
        }
    }
}

impl PlatformClient {
    /// Create the smart collection for one range/subrange pair. Both
    /// metafield rules must match, so the rule set is conjunctive.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if the platform rejects the input (a
    /// duplicate handle, most commonly), plus the usual transport errors.
    #[instrument(skip(self), fields(range, subrange))]
    pub async fn create_collection(
        &self,
        range: &str,
        subrange: &str,
        range_definition_id: &str,
        subrange_definition_id: &str,
    ) -> Result<CreatedCollection, PlatformError> {
        let input = json!({
            "title": format!("{range}_{subrange}"),
            "ruleSet": {
                "appliedDisjunctively": false,
                "rules": [
                    {
                        "column": "PRODUCT_METAFIELD_DEFINITION",
                        "relation": "EQUALS",
                        "condition": range,
                        "conditionObjectId": range_definition_id,
                    },
                    {
                        "column": "PRODUCT_METAFIELD_DEFINITION",
                        "relation": "EQUALS",
                        "condition": subrange,
                        "conditionObjectId": subrange_definition_id,
                    },
                ],
            },
        });

        let data = self
            .execute(COLLECTION_CREATE_MUTATION, json!({ "input": input }))
            .await?;
        let payload = &data["collectionCreate"];
        fail_on_user_errors(payload)?;
        Ok(serde_json::from_value(payload["collection"].clone())?)
    }

    /// Rewrite a collection's title and handle.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if the platform rejects the input (a handle
    /// already in use, most commonly), plus the usual transport errors.
    #[instrument(skip(self), fields(id, title))]
    pub async fn update_collection(
        &self,
        id: &str,
        title: &str,
        handle: &str,
    ) -> Result<(), PlatformError> {
        let data = self
            .execute(
                COLLECTION_UPDATE_MUTATION,
                json!({ "input": { "id": id, "title": title, "handle": handle } }),
            )
            .await?;
        fail_on_user_errors(&data["collectionUpdate"])?;
        Ok(())
    }

    /// Walk every collection on the store. Used to map collection titles
    /// back to ids when building the navigation menu.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn all_collections(
        &self,
        page_size: u32,
    ) -> Result<Vec<CreatedCollection>, PlatformError> {
        #[derive(Deserialize)]
        struct CollectionsData {
            collections: Page,
        }
        #[derive(Deserialize)]
        struct Page {
            #[serde(default)]
            nodes: Vec<CreatedCollection>,
            #[serde(rename = "pageInfo")]
            page_info: PageInfo,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct PageInfo {
            end_cursor: Option<String>,
            has_next_page: bool,
        }

        let mut collections = Vec::new();
        let mut after: Option<String> = None;
        loop {
            let data = self
                .execute(
                    COLLECTION_PAGE_QUERY,
                    json!({ "first": page_size, "after": after }),
                )
                .await?;
            let decoded: CollectionsData = serde_json::from_value(data)?;
            collections.extend(decoded.collections.nodes);
            if decoded.collections.page_info.has_next_page {
                after = decoded.collections.page_info.end_cursor;
            } else {
                break;
            }
        }
        Ok(collections)
    }

    /// Create the storefront navigation menu from the range tree.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if the platform rejects the menu (an existing
    /// handle, most commonly), plus the usual transport errors.
    #[instrument(skip(self, items), fields(title, handle, top_level = items.len()))]
    pub async fn create_menu(
        &self,
        title: &str,
        handle: &str,
        items: &[MenuItemInput],
    ) -> Result<String, PlatformError> {
        let data = self
            .execute(
                MENU_CREATE_MUTATION,
                json!({ "title": title, "handle": handle, "items": items }),
            )
            .await?;
        let payload = &data["menuCreate"];
        fail_on_user_errors(payload)?;
        payload["menu"]["id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                PlatformError::GraphQL(vec![GraphQLError {
                    message: "menuCreate returned no menu".to_string(),
                    path: vec![],
                }])
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_handleize_keeps_letters_digits_and_plus() {
        assert_eq!(handleize("Kochserie 900+"), "kochserie-900+");
        assert_eq!(handleize("Herd Elektro & Gas"), "herd-elektro-gas");
        assert_eq!(handleize("Gyros-/Kebab-Grill"), "gyros-kebab-grill");
        assert_eq!(handleize("Bäckereiöfen"), "bäckereiöfen");
    }

    #[test]
    fn test_handleize_collapses_whitespace_runs() {
        assert_eq!(handleize("  Zu- und  Auslauftische "), "zu-und-auslauftische");
    }

    #[test]
    fn test_menu_item_serialization() {
        let item = MenuItemInput::frontpage(
            "Spülung",
            vec![MenuItemInput::collection(
                "Haubenspülmaschinen",
                "gid://shopify/Collection/1",
            )],
        );
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "FRONTPAGE");
        assert!(value.get("resourceId").is_none());
        assert_eq!(value["items"][0]["type"], "COLLECTION");
        assert_eq!(value["items"][0]["resourceId"], "gid://shopify/Collection/1");
    }
}
