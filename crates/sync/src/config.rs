//! Sync configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STORES` - Comma-separated storefront names (e.g., `DIAMOND`)
//!
//! Per store `{STORE}` listed in `STORES`:
//! - `{STORE}_SHOPIFY_STORE_DOMAIN` - Shopify store domain (e.g., my-store.myshopify.com)
//! - `{STORE}_SHOPIFY_ACCESS_TOKEN` - Admin API access token (HIGH PRIVILEGE)
//! - `{STORE}_LOCATION_ID` - Inventory location GID for stock adjustments
//! - `{STORE}_LOGIN_API` - Supplier login endpoint URL
//! - `{STORE}_EMAIL` - Supplier account email
//! - `{STORE}_PASSWORD` - Supplier account password
//! - `{STORE}_PRODUCT_EXPORT_API` - Supplier product feed endpoint URL
//! - `{STORE}_ORDER_UPLOAD_API` - Supplier order upload endpoint URL
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2025-01)
//! - `SYNC_LOG_DIR` - Directory for dead-letter log files (default: logs)
//! - `{STORE}_STRICT_FEED` - Treat malformed feed responses as fatal (default: false)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use crate::registry::{self, StoreProfile};

const DEFAULT_API_VERSION: &str = "2025-01";
const DEFAULT_LOG_DIR: &str = "logs";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("No store profile registered for store: {0}")]
    UnknownStore(String),
}

/// Top-level sync configuration covering every configured storefront.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// One entry per storefront named in `STORES`, in declaration order
    pub stores: Vec<StoreConfig>,
    /// Directory for dead-letter log files
    pub log_dir: PathBuf,
}

/// Configuration for one storefront and its supplier account.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Store name as listed in `STORES` (e.g., `DIAMOND`)
    pub name: String,
    /// Shopify Admin API configuration
    pub shopify: ShopifyConfig,
    /// Supplier catalog API configuration
    pub supplier: SupplierConfig,
    /// Static store profile (metafield table, taxonomy) resolved at load time
    pub profile: &'static StoreProfile,
}

/// Shopify Admin API configuration.
///
/// Implements `Debug` manually to redact the HIGH PRIVILEGE access token.
#[derive(Clone)]
pub struct ShopifyConfig {
    /// Shopify store domain (e.g., my-store.myshopify.com)
    pub domain: String,
    /// Shopify API version (e.g., 2025-01)
    pub api_version: String,
    /// Admin API access token (HIGH PRIVILEGE - full store access)
    pub access_token: SecretString,
    /// Inventory location GID stock adjustments are applied against
    pub location_id: String,
}

impl std::fmt::Debug for ShopifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyConfig")
            .field("domain", &self.domain)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .field("location_id", &self.location_id)
            .finish()
    }
}

/// Supplier catalog API configuration.
///
/// Implements `Debug` manually to redact the account password.
#[derive(Clone)]
pub struct SupplierConfig {
    /// Login endpoint URL (POST email/password, returns access token)
    pub login_url: String,
    /// Supplier account email
    pub email: String,
    /// Supplier account password
    pub password: SecretString,
    /// Product feed endpoint URL
    pub product_export_url: String,
    /// Order upload endpoint URL
    pub order_upload_url: String,
    /// When true, malformed feed responses abort the run instead of
    /// yielding an empty product list
    pub strict_feed: bool,
}

impl std::fmt::Debug for SupplierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupplierConfig")
            .field("login_url", &self.login_url)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("product_export_url", &self.product_export_url)
            .field("order_upload_url", &self.order_upload_url)
            .field("strict_feed", &self.strict_feed)
            .finish()
    }
}

impl SyncConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `STORES` is missing or empty, if any
    /// per-store variable is missing, or if a listed store has no
    /// registered profile.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let stores_raw = get_required_env("STORES")?;
        let names: Vec<&str> = stores_raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if names.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "STORES".to_string(),
                "must list at least one store".to_string(),
            ));
        }

        let api_version = get_env_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION);
        let stores = names
            .into_iter()
            .map(|name| StoreConfig::from_env(name, &api_version))
            .collect::<Result<Vec<_>, _>>()?;
        let log_dir = PathBuf::from(get_env_or_default("SYNC_LOG_DIR", DEFAULT_LOG_DIR));

        Ok(Self { stores, log_dir })
    }

    /// Looks up a store by its Shopify domain (used for webhook routing).
    #[must_use]
    pub fn store_by_domain(&self, domain: &str) -> Option<&StoreConfig> {
        self.stores.iter().find(|s| s.shopify.domain == domain)
    }

    /// Looks up a store by name (case-insensitive).
    #[must_use]
    pub fn store_by_name(&self, name: &str) -> Option<&StoreConfig> {
        self.stores.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

impl StoreConfig {
    fn from_env(name: &str, api_version: &str) -> Result<Self, ConfigError> {
        let profile =
            registry::profile(name).ok_or_else(|| ConfigError::UnknownStore(name.to_string()))?;

        let shopify = ShopifyConfig {
            domain: get_store_env(name, "SHOPIFY_STORE_DOMAIN")?,
            api_version: api_version.to_string(),
            access_token: SecretString::from(get_store_env(name, "SHOPIFY_ACCESS_TOKEN")?),
            location_id: get_store_env(name, "LOCATION_ID")?,
        };
        let supplier = SupplierConfig {
            login_url: get_store_env(name, "LOGIN_API")?,
            email: get_store_env(name, "EMAIL")?,
            password: SecretString::from(get_store_env(name, "PASSWORD")?),
            product_export_url: get_store_env(name, "PRODUCT_EXPORT_API")?,
            order_upload_url: get_store_env(name, "ORDER_UPLOAD_API")?,
            strict_feed: get_store_bool(name, "STRICT_FEED", false)?,
        };

        Ok(Self {
            name: name.to_string(),
            shopify,
            supplier,
            profile,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a required `{STORE}_`-prefixed environment variable.
fn get_store_env(store: &str, suffix: &str) -> Result<String, ConfigError> {
    get_required_env(&format!("{store}_{suffix}"))
}

/// Get an optional `{STORE}_`-prefixed boolean environment variable.
fn get_store_bool(store: &str, suffix: &str, default: bool) -> Result<bool, ConfigError> {
    let key = format!("{store}_{suffix}");
    match std::env::var(&key) {
        Ok(value) => value
            .parse::<bool>()
            .map_err(|e| ConfigError::InvalidEnvVar(key, e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_store_config() -> StoreConfig {
        StoreConfig {
            name: "DIAMOND".to_string(),
            shopify: ShopifyConfig {
                domain: "diamond-test.myshopify.com".to_string(),
                api_version: "2025-01".to_string(),
                access_token: SecretString::from("shpat_super_secret_token"),
                location_id: "gid://shopify/Location/1".to_string(),
            },
            supplier: SupplierConfig {
                login_url: "https://supplier.example.com/login".to_string(),
                email: "sync@example.com".to_string(),
                password: SecretString::from("super_secret_password"),
                product_export_url: "https://supplier.example.com/products".to_string(),
                order_upload_url: "https://supplier.example.com/orders".to_string(),
                strict_feed: false,
            },
            profile: registry::profile("DIAMOND").unwrap(),
        }
    }

    #[test]
    fn test_shopify_config_debug_redacts_token() {
        let config = test_store_config();
        let debug_output = format!("{:?}", config.shopify);

        assert!(debug_output.contains("diamond-test.myshopify.com"));
        assert!(debug_output.contains("2025-01"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("shpat_super_secret_token"));
    }

    #[test]
    fn test_supplier_config_debug_redacts_password() {
        let config = test_store_config();
        let debug_output = format!("{:?}", config.supplier);

        assert!(debug_output.contains("sync@example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_password"));
    }

    #[test]
    fn test_store_by_domain() {
        let config = SyncConfig {
            stores: vec![test_store_config()],
            log_dir: PathBuf::from("logs"),
        };

        assert!(config.store_by_domain("diamond-test.myshopify.com").is_some());
        assert!(config.store_by_domain("other.myshopify.com").is_none());
    }

    #[test]
    fn test_store_by_name_case_insensitive() {
        let config = SyncConfig {
            stores: vec![test_store_config()],
            log_dir: PathBuf::from("logs"),
        };

        assert!(config.store_by_name("diamond").is_some());
        assert!(config.store_by_name("DIAMOND").is_some());
        assert!(config.store_by_name("EMERALD").is_none());
    }
}
