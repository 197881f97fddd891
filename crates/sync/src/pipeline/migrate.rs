//! Initial catalog migration and relationship backfill.

use skubridge_core::SupplierProduct;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::deadletter::MIGRATE_ERRORS;
use crate::error::SyncError;
use crate::relationships::sync_relationships;
use crate::supplier::FeedFilter;

use super::{ItemFailure, KnownProducts, SyncService};

/// Counters for a migration run.
#[derive(Debug, Default)]
pub struct MigrationSummary {
    pub run_id: Uuid,
    pub feed_records: usize,
    pub created: usize,
    pub failures: usize,
    pub relationship_errors: usize,
}

impl SyncService {
    /// Migrate the supplier's full current catalog onto the platform:
    /// create every record, then resolve relationships over the whole
    /// list. Creation failures are dead-lettered and the migration
    /// keeps going; the failed records are re-runnable from the
    /// dead-letter files.
    ///
    /// # Errors
    ///
    /// Returns an error when supplier login, the feed fetch, or the
    /// publication lookup fails, when the store has no publications, or
    /// when a platform mutation fails at the transport level.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn run_migration(&self) -> Result<MigrationSummary, SyncError> {
        let token = self.supplier.login().await?;

        let publications = self.platform.publications().await?;
        if publications.is_empty() {
            return Err(SyncError::NoPublications(self.store.clone()));
        }

        let products = self
            .supplier
            .fetch_products(&token, FeedFilter::CurrentCatalog)
            .await?;
        info!(store = %self.store, records = products.len(), "full catalog fetched");

        let run_id = Uuid::new_v4();
        let records: Vec<&SupplierProduct> = products.iter().collect();
        let outcome = self.create_products(&records, &publications).await?;

        let mut known = KnownProducts::default();
        for product in &outcome.created {
            known.add(&product.product_id, &product.sku);
        }
        self.dead_letter_failures(MIGRATE_ERRORS, run_id, &outcome.failures);

        let referrers: Vec<SupplierProduct> = products
            .iter()
            .filter(|record| record.has_relationships())
            .cloned()
            .collect();
        let relationship_errors = if referrers.is_empty() {
            0
        } else {
            let errors = sync_relationships(&self.platform, &referrers, &known.refs).await?;
            let failures: Vec<ItemFailure> = errors
                .iter()
                .map(|error| ItemFailure {
                    sku: String::new(),
                    reason: format!("relationship metafield rejected: {error}"),
                })
                .collect();
            self.dead_letter_failures(MIGRATE_ERRORS, run_id, &failures);
            errors.len()
        };

        let summary = MigrationSummary {
            run_id,
            feed_records: products.len(),
            created: outcome.created.len(),
            failures: outcome.failures.len(),
            relationship_errors,
        };
        info!(
            store = %self.store,
            created = summary.created,
            failures = summary.failures,
            "migration finished"
        );
        Ok(summary)
    }

    /// Re-resolve relationship metafields across the whole current
    /// catalog. Used after a migration whose relationship pass was
    /// incomplete.
    ///
    /// # Errors
    ///
    /// Returns an error when supplier login, the feed fetch, or a
    /// platform call fails at the transport level.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn run_relationship_backfill(&self) -> Result<usize, SyncError> {
        let token = self.supplier.login().await?;
        let products = self
            .supplier
            .fetch_products(&token, FeedFilter::CurrentCatalog)
            .await?;

        let referrers: Vec<SupplierProduct> = products
            .into_iter()
            .filter(SupplierProduct::has_relationships)
            .collect();
        if referrers.is_empty() {
            return Ok(0);
        }

        let errors = sync_relationships(&self.platform, &referrers, &[]).await?;
        if !errors.is_empty() {
            let run_id = Uuid::new_v4();
            let failures: Vec<ItemFailure> = errors
                .iter()
                .map(|error| ItemFailure {
                    sku: String::new(),
                    reason: format!("relationship metafield rejected: {error}"),
                })
                .collect();
            self.dead_letter_failures(MIGRATE_ERRORS, run_id, &failures);
        }
        Ok(referrers.len())
    }
}
