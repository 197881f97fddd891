//! Sync pipelines: recurring runs, migration, and one-off maintenance.
//!
//! [`SyncService`] bundles the per-store collaborators (platform client,
//! supplier client, store profile, dead-letter sink) and exposes one
//! method per operation. Batch sizes are endpoint-specific constants;
//! each one matches a payload or query-cost limit of the endpoint it
//! feeds.
//!
//! Failure policy: per-item failures are dead-lettered and the run
//! continues; only transport-level errors and whole-mutation user errors
//! abort a run.

use std::sync::Arc;

use serde_json::json;
use skubridge_core::SkuRef;
use tracing::warn;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::deadletter::{DeadLetterRecord, DeadLetterSink};
use crate::registry::StoreProfile;
use crate::shopify::PlatformClient;
use crate::supplier::SupplierClient;

pub mod create;
pub mod daily;
pub mod hourly;
pub mod maintenance;
pub mod migrate;

/// Feed records per reconcile batch; one platform read covers one batch.
pub(crate) const FEED_BATCH_SIZE: usize = 50;
/// Products created concurrently; each create is a heavy mutation.
pub(crate) const CREATE_BATCH_SIZE: usize = 3;
/// Status transitions fanned out per batch.
pub(crate) const DISABLE_BATCH_SIZE: usize = 5;
/// Variant price rewrites fanned out per batch.
pub(crate) const PRICE_BATCH_SIZE: usize = 10;
/// Products whose media additions are sent per batch.
pub(crate) const MEDIA_ADD_BATCH_SIZE: usize = 5;
/// Media/file ids per `fileDelete` call during sync.
pub(crate) const MEDIA_DELETE_BATCH_SIZE: usize = 25;
/// `inventoryAdjustQuantities` changes per call.
pub(crate) const STOCK_BATCH_SIZE: usize = 25;
/// SKU terms per products search query.
pub(crate) const SKU_LOOKUP_BATCH_SIZE: usize = 100;
/// Filename terms per files search query during creation.
pub(crate) const FILE_LOOKUP_BATCH_SIZE: usize = 100;
/// Files staged and uploaded per batch.
pub(crate) const FILE_UPLOAD_BATCH_SIZE: usize = 5;
/// Product-publication pairs published per batch.
pub(crate) const PUBLISH_BATCH_SIZE: usize = 30;

/// One item that failed within an otherwise-surviving run.
#[derive(Debug)]
pub struct ItemFailure {
    pub sku: String,
    pub reason: String,
}

/// Per-store sync service.
pub struct SyncService {
    store: String,
    profile: &'static StoreProfile,
    location_id: String,
    platform: PlatformClient,
    supplier: SupplierClient,
    dead_letter: Arc<dyn DeadLetterSink>,
}

impl SyncService {
    #[must_use]
    pub fn new(config: &StoreConfig, dead_letter: Arc<dyn DeadLetterSink>) -> Self {
        Self {
            store: config.name.clone(),
            profile: config.profile,
            location_id: config.shopify.location_id.clone(),
            platform: PlatformClient::new(&config.shopify),
            supplier: SupplierClient::new(&config.supplier),
            dead_letter,
        }
    }

    /// Store name this service syncs.
    #[must_use]
    pub fn store(&self) -> &str {
        &self.store
    }

    #[must_use]
    pub fn platform(&self) -> &PlatformClient {
        &self.platform
    }

    #[must_use]
    pub fn supplier(&self) -> &SupplierClient {
        &self.supplier
    }

    /// Record item failures to the given dead-letter stream. A failing
    /// sink is logged, never propagated; losing a record must not fail
    /// the run a second time.
    pub(crate) fn dead_letter_failures(
        &self,
        stream: &str,
        run_id: Uuid,
        failures: &[ItemFailure],
    ) {
        for failure in failures {
            let record = DeadLetterRecord::new(run_id, &self.store, failure.reason.clone())
                .with_sku(&failure.sku)
                .with_payload(json!({ "sku": failure.sku }));
            if let Err(error) = self.dead_letter.record(stream, &record) {
                warn!(sku = %failure.sku, %error, "failed to dead-letter item");
            }
        }
    }
}

/// Accumulated id/SKU pairs known to the current run; seeds relationship
/// resolution so already-seen products are not queried again.
#[derive(Debug, Default)]
pub(crate) struct KnownProducts {
    pub refs: Vec<SkuRef>,
}

impl KnownProducts {
    pub fn add(&mut self, id: &str, sku: &str) {
        self.refs.push(SkuRef {
            id: id.to_string(),
            sku: sku.to_string(),
        });
    }
}
