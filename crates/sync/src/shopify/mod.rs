//! Commerce-platform (Shopify Admin) GraphQL client (HIGH PRIVILEGE).
//!
//! # Security
//!
//! **This module holds the high-privilege Admin API access token.** The
//! token has full write access to products, inventory, files, collections
//! and publications of the store it belongs to.
//!
//! # Architecture
//!
//! - One client per configured store; cloning is cheap (`Arc` inside)
//! - Raw GraphQL documents with JSON variables, responses decoded into
//!   the narrow types the sync actually reads
//! - Rate limiting and auth failures surface as typed errors
//!
//! Method groups live in submodules by concern: products, inventory,
//! metafields, files, publications, collections.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::ShopifyConfig;

mod collections;
mod files;
mod inventory;
mod metafields;
mod products;
mod publications;

pub use collections::{CreatedCollection, MenuItemInput, handleize};
pub use files::StagedFileSource;
pub use products::CreatedProduct;

/// Errors that can occur when interacting with the Admin API.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON decoding of a response payload failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by the platform.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Mutation reported user errors (e.g., invalid input).
    #[error("User errors: {}", format_user_errors(.0))]
    UserErrors(Vec<UserError>),

    /// Staged upload of file bytes failed.
    #[error("Staged upload failed: {0}")]
    Upload(String),
}

/// A GraphQL error returned by the Admin API.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Path to the error in the response.
    #[serde(default)]
    pub path: Vec<Value>,
}

/// A `userErrors` entry from a mutation payload.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct UserError {
    /// Input path the error refers to.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable error code, where the mutation exposes one.
    #[serde(default)]
    pub code: Option<String>,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) if !field.is_empty() => {
                write!(f, "{}: {}", field.join("."), self.message)
            }
            _ => write!(f, "{}", self.message),
        }
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Admin API GraphQL client for one store.
#[derive(Clone)]
pub struct PlatformClient {
    inner: Arc<PlatformClientInner>,
}

struct PlatformClientInner {
    client: reqwest::Client,
    domain: String,
    api_version: String,
    access_token: String,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQLError>>,
}

impl PlatformClient {
    /// Create a new Admin API client for one store.
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        Self {
            inner: Arc::new(PlatformClientInner {
                client: reqwest::Client::new(),
                domain: config.domain.clone(),
                api_version: config.api_version.clone(),
                access_token: config.access_token.expose_secret().to_string(),
            }),
        }
    }

    /// The store domain this client talks to.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.inner.domain
    }

    fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    /// Execute a GraphQL document and return the `data` payload.
    ///
    /// # Errors
    ///
    /// Returns `RateLimited`/`Unauthorized` for the matching HTTP statuses,
    /// `GraphQL` when the response carries top-level errors, and `Http`
    /// for transport failures. A response without `data` is also a
    /// `GraphQL` error.
    pub(crate) async fn execute(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<Value, PlatformError> {
        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            self.inner.domain, self.inner.api_version
        );

        let response = self
            .inner
            .client
            .post(&endpoint)
            .header("X-Shopify-Access-Token", &self.inner.access_token)
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(PlatformError::RateLimited(retry_after));
        }

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(PlatformError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        let graphql_response: GraphQLResponse = response.json().await?;

        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            return Err(PlatformError::GraphQL(errors));
        }

        graphql_response.data.ok_or_else(|| {
            PlatformError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                path: vec![],
            }])
        })
    }
}

/// Build a `sku:A OR sku:B` disjunction for the products search query.
pub(crate) fn sku_disjunction<S: AsRef<str>>(skus: &[S]) -> String {
    skus.iter()
        .map(|sku| format!("sku:{}", sku.as_ref()))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Decode the `userErrors` list of a mutation payload.
pub(crate) fn user_errors(payload: &Value) -> Result<Vec<UserError>, PlatformError> {
    match payload.get("userErrors") {
        Some(list) => Ok(serde_json::from_value(list.clone())?),
        None => Ok(Vec::new()),
    }
}

/// Fail with `PlatformError::UserErrors` when a mutation payload carries any.
pub(crate) fn fail_on_user_errors(payload: &Value) -> Result<(), PlatformError> {
    let errors = user_errors(payload)?;
    if errors.is_empty() {
        Ok(())
    } else {
        Err(PlatformError::UserErrors(errors))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sku_disjunction() {
        assert_eq!(
            sku_disjunction(&["A1", "B2", "C3"]),
            "sku:A1 OR sku:B2 OR sku:C3"
        );
        assert_eq!(sku_disjunction::<&str>(&[]), "");
    }

    #[test]
    fn test_user_error_display() {
        let with_field = UserError {
            field: Some(vec!["variants".to_string(), "price".to_string()]),
            message: "Price must be positive".to_string(),
            code: None,
        };
        assert_eq!(with_field.to_string(), "variants.price: Price must be positive");

        let without_field = UserError {
            field: None,
            message: "Something went wrong".to_string(),
            code: Some("INVALID".to_string()),
        };
        assert_eq!(without_field.to_string(), "Something went wrong");
    }

    #[test]
    fn test_user_errors_decoding() {
        let payload = serde_json::json!({
            "userErrors": [
                { "field": ["title"], "message": "Title is taken" },
                { "field": null, "message": "Rate limited", "code": "THROTTLED" }
            ]
        });
        let errors = user_errors(&payload).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].code.as_deref(), Some("THROTTLED"));
        assert!(fail_on_user_errors(&payload).is_err());
    }

    #[test]
    fn test_missing_user_errors_is_empty() {
        let payload = serde_json::json!({ "product": { "id": "gid://shopify/Product/1" } });
        assert!(user_errors(&payload).unwrap().is_empty());
        assert!(fail_on_user_errors(&payload).is_ok());
    }

    #[test]
    fn test_graphql_error_formatting() {
        let err = PlatformError::GraphQL(vec![
            GraphQLError { message: "Field not found".to_string(), path: vec![] },
            GraphQLError { message: "Invalid ID".to_string(), path: vec![] },
        ]);
        assert_eq!(err.to_string(), "GraphQL errors: Field not found; Invalid ID");
    }
}
