//! Application state shared across handlers and scheduled jobs.

use std::sync::Arc;

use skubridge_sync::deadletter::FileSink;
use skubridge_sync::{SyncConfig, SyncService};

/// Application state shared across all handlers.
///
/// Holds one [`SyncService`] per configured storefront. Cheaply cloneable
/// via `Arc`; the scheduler and the webhook handlers share the same
/// services.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SyncConfig,
    services: Vec<Arc<SyncService>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: SyncConfig) -> Self {
        let dead_letter = Arc::new(FileSink::new(&config.log_dir));
        let services = config
            .stores
            .iter()
            .map(|store| Arc::new(SyncService::new(store, dead_letter.clone())))
            .collect();

        Self {
            inner: Arc::new(AppStateInner { config, services }),
        }
    }

    /// Every configured store's sync service.
    #[must_use]
    pub fn services(&self) -> &[Arc<SyncService>] {
        &self.inner.services
    }

    /// Resolve the sync service for a Shopify store domain. Webhooks
    /// carry the domain in the `x-shopify-shop-domain` header.
    #[must_use]
    pub fn service_by_domain(&self, domain: &str) -> Option<&Arc<SyncService>> {
        let store = self.inner.config.store_by_domain(domain)?;
        self.inner
            .services
            .iter()
            .find(|service| service.store() == store.name)
    }
}
