//! Supplier catalog API client.
//!
//! Authentication is account-based: a login request trades the store's
//! configured email/password for a bearer token, and every feed or order
//! request carries that token. Tokens are fetched per run, never cached
//! across runs.
//!
//! The product-export endpoint serves the catalog in one JSON:API
//! document, filtered server-side by query parameters. The supplier
//! localizes attribute text by `Accept-Language`; the synced storefronts
//! are German, so the feed is always requested with `de`.

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;
use skubridge_core::{SupplierFeed, SupplierProduct};
use thiserror::Error;
use tracing::{instrument, warn};

use crate::config::SupplierConfig;

/// Errors from the supplier API.
#[derive(Debug, Error)]
pub enum SupplierError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Login succeeded at the transport level but returned no token.
    #[error("Supplier login failed: {0}")]
    Auth(String),

    /// The feed endpoint returned something other than JSON and the
    /// store runs in strict feed mode.
    #[error("Feed error: {0}")]
    Feed(String),

    /// JSON decoding of a response payload failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The order-intake endpoint did not acknowledge the order.
    #[error("Order upload rejected: {0}")]
    OrderRejected(String),
}

/// Server-side filter applied to the product-export endpoint.
#[derive(Debug, Clone, Copy)]
pub enum FeedFilter {
    /// Every product still in the catalog (`is_old == 0`); used by the
    /// initial migration.
    CurrentCatalog,
    /// Products updated after the given instant; used by the recurring
    /// sync runs.
    UpdatedSince(DateTime<Utc>),
}

impl FeedFilter {
    fn query_string(self) -> String {
        match self {
            Self::CurrentCatalog => "filter[is_old][value]=0".to_string(),
            Self::UpdatedSince(since) => format!(
                "filter[products.updated_at][value]={}&filter[products.updated_at][op]=gt",
                since.format("%Y-%m-%d %H:%M:%S")
            ),
        }
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Client for one store's supplier account.
#[derive(Clone)]
pub struct SupplierClient {
    client: reqwest::Client,
    config: SupplierConfig,
}

impl SupplierClient {
    #[must_use]
    pub fn new(config: &SupplierConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: config.clone(),
        }
    }

    /// Exchange the configured credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `Auth` when the supplier answers without an
    /// `access_token`; the caller aborts the run for this store.
    #[instrument(skip(self))]
    pub async fn login(&self) -> Result<String, SupplierError> {
        let response: LoginResponse = self
            .client
            .post(&self.config.login_url)
            .json(&serde_json::json!({
                "email": self.config.email,
                "password": self.config.password.expose_secret(),
            }))
            .send()
            .await?
            .json()
            .await?;

        response
            .access_token
            .ok_or_else(|| SupplierError::Auth("no access token in login response".to_string()))
    }

    /// Fetch the filtered product feed.
    ///
    /// A non-JSON response (the supplier serves an HTML error page under
    /// load) yields an empty list with a warning, unless the store is
    /// configured strict, in which case it is a `Feed` error.
    ///
    /// # Errors
    ///
    /// Returns `Http` for transport failures, `Parse` when the body
    /// claims to be JSON but is not a feed document, and `Feed` in
    /// strict mode as described above.
    #[instrument(skip(self, access_token))]
    pub async fn fetch_products(
        &self,
        access_token: &str,
        filter: FeedFilter,
    ) -> Result<Vec<SupplierProduct>, SupplierError> {
        let url = format!(
            "{}?{}",
            self.config.product_export_url,
            filter.query_string()
        );

        let response = self
            .client
            .get(&url)
            .header("Accept-Language", "de")
            .bearer_auth(access_token)
            .send()
            .await?;

        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        decode_feed(is_json, &response.bytes().await?, self.config.strict_feed)
    }

    /// POST a formatted order payload to the supplier's order-intake
    /// endpoint.
    ///
    /// # Errors
    ///
    /// Returns `OrderRejected` when the response carries no `data`
    /// payload, mirroring how the intake endpoint signals failure.
    #[instrument(skip(self, access_token, order))]
    pub async fn upload_order(
        &self,
        access_token: &str,
        order: &Value,
    ) -> Result<Value, SupplierError> {
        let response: Value = self
            .client
            .post(&self.config.order_upload_url)
            .header("Accept-Language", "en")
            .bearer_auth(access_token)
            .json(order)
            .send()
            .await?
            .json()
            .await?;

        let acknowledged = response.get("data").is_some_and(|data| !data.is_null());
        if acknowledged {
            Ok(response)
        } else {
            Err(SupplierError::OrderRejected(response.to_string()))
        }
    }
}

/// Turn a feed response body into products, applying the store's feed
/// strictness. A non-JSON body is an empty feed in lenient mode and a
/// `Feed` error in strict mode.
fn decode_feed(
    is_json: bool,
    body: &[u8],
    strict_feed: bool,
) -> Result<Vec<SupplierProduct>, SupplierError> {
    if !is_json {
        let preview: String = String::from_utf8_lossy(body).chars().take(200).collect();
        if strict_feed {
            return Err(SupplierError::Feed(format!(
                "non-JSON feed response: {preview}"
            )));
        }
        warn!(body = %preview, "non-JSON feed response, treating as empty feed");
        return Ok(Vec::new());
    }

    let feed: SupplierFeed = serde_json::from_slice(body)?;
    Ok(feed.data)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_catalog_filter_query() {
        assert_eq!(
            FeedFilter::CurrentCatalog.query_string(),
            "filter[is_old][value]=0"
        );
    }

    #[test]
    fn test_updated_since_filter_query() {
        let since = Utc.with_ymd_and_hms(2025, 3, 14, 6, 0, 0).unwrap();
        assert_eq!(
            FeedFilter::UpdatedSince(since).query_string(),
            "filter[products.updated_at][value]=2025-03-14 06:00:00&filter[products.updated_at][op]=gt"
        );
    }

    #[test]
    fn test_login_response_without_token() {
        let decoded: LoginResponse = serde_json::from_str("{}").unwrap();
        assert!(decoded.access_token.is_none());
    }

    #[test]
    fn test_non_json_feed_is_empty_in_lenient_mode() {
        let body = b"<html><body>502 Bad Gateway</body></html>";
        let products = decode_feed(false, body, false).unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_non_json_feed_errors_in_strict_mode() {
        let body = b"<html><body>502 Bad Gateway</body></html>";
        let error = decode_feed(false, body, true).unwrap_err();
        assert!(matches!(error, SupplierError::Feed(_)));
        assert!(error.to_string().contains("502 Bad Gateway"));
    }

    #[test]
    fn test_json_feed_decodes_in_either_mode() {
        let body = br#"{ "data": [{ "id": "SKU1", "attributes": { "name": "Oven" } }] }"#;
        for strict in [false, true] {
            let products = decode_feed(true, body, strict).unwrap();
            assert_eq!(products.len(), 1);
            assert_eq!(products[0].id, "SKU1");
        }
    }

    #[test]
    fn test_malformed_json_feed_is_a_parse_error_even_when_lenient() {
        let error = decode_feed(true, b"{ not json", false).unwrap_err();
        assert!(matches!(error, SupplierError::Parse(_)));
    }
}
