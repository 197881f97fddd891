//! Catalog-change sync run (twice daily).
//!
//! The feed window is the last 24 hours; the scheduler fires twice a
//! day, so consecutive windows overlap rather than risk a gap. Every
//! applied action is idempotent against an already-synced product, which
//! makes the overlap harmless.

use chrono::{Duration, Utc};
use futures::future::join_all;
use skubridge_core::{ProductStatus, Publication, SupplierProduct, batch};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::deadletter::SYNC_ERRORS;
use crate::error::SyncError;
use crate::reconcile::{self, RunContext};
use crate::relationships::sync_relationships;
use crate::shopify::PlatformError;
use crate::supplier::FeedFilter;

use super::{
    DISABLE_BATCH_SIZE, FEED_BATCH_SIZE, ItemFailure, KnownProducts, MEDIA_ADD_BATCH_SIZE,
    MEDIA_DELETE_BATCH_SIZE, PRICE_BATCH_SIZE, SyncService,
};

/// Counters for one catalog-change run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub feed_records: usize,
    pub created: usize,
    pub disabled: usize,
    pub price_updates: usize,
    pub media_updates: usize,
    pub failures: usize,
    pub relationship_errors: usize,
}

impl SyncService {
    /// Fetch the last day's feed changes and reconcile them.
    ///
    /// # Errors
    ///
    /// Returns an error when supplier login or the feed fetch fails, or
    /// when a platform mutation fails at the transport level.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn run_daily(&self) -> Result<RunSummary, SyncError> {
        let token = self.supplier.login().await?;
        let since = Utc::now() - Duration::hours(24);
        let products = self
            .supplier
            .fetch_products(&token, FeedFilter::UpdatedSince(since))
            .await?;
        info!(store = %self.store, records = products.len(), "feed window fetched");
        self.sync_catalog_changes(&products).await
    }

    /// Reconcile a list of feed records against the platform, batch by
    /// batch, then resolve relationships for everything created.
    pub(crate) async fn sync_catalog_changes(
        &self,
        products: &[SupplierProduct],
    ) -> Result<RunSummary, SyncError> {
        let mut context = RunContext::new();
        let mut known = KnownProducts::default();
        let mut created_referrers: Vec<SupplierProduct> = Vec::new();
        let mut publications: Option<Vec<Publication>> = None;
        let mut summary = RunSummary {
            run_id: context.run_id,
            feed_records: products.len(),
            ..RunSummary::default()
        };

        for feed_batch in batch::chunk(products, FEED_BATCH_SIZE) {
            let skus: Vec<&str> = feed_batch.iter().map(|p| p.id.as_str()).collect();
            let platform_products = self.platform.products_by_skus(&skus).await?;
            for product in &platform_products {
                known.add(&product.id, &product.variant.sku);
            }

            let plan = reconcile::plan_batch(feed_batch, &platform_products, &context);
            if plan.is_empty() {
                continue;
            }

            if !plan.creates.is_empty() {
                if publications.is_none() {
                    let fetched = self.platform.publications().await?;
                    if fetched.is_empty() {
                        return Err(SyncError::NoPublications(self.store.clone()));
                    }
                    publications = Some(fetched);
                }
                let outcome = self
                    .create_products(&plan.creates, publications.as_deref().unwrap_or(&[]))
                    .await?;
                for record in &plan.creates {
                    context.mark_created(&record.id);
                    if record.has_relationships() {
                        created_referrers.push((*record).clone());
                    }
                }
                for product in &outcome.created {
                    known.add(&product.product_id, &product.sku);
                }
                summary.created += outcome.created.len();
                summary.failures += outcome.failures.len();
                self.dead_letter_failures(SYNC_ERRORS, context.run_id, &outcome.failures);
            }

            summary.disabled += self
                .apply_disables(&plan.disables, context.run_id)
                .await?;
            summary.price_updates += self
                .apply_price_updates(&plan.price_updates, context.run_id)
                .await?;
            summary.media_updates += self.apply_media_updates(&plan.media_updates).await?;
        }

        if !created_referrers.is_empty() {
            let errors =
                sync_relationships(&self.platform, &created_referrers, &known.refs).await?;
            summary.relationship_errors = errors.len();
            let failures: Vec<ItemFailure> = errors
                .into_iter()
                .map(|error| ItemFailure {
                    sku: String::new(),
                    reason: format!("relationship metafield rejected: {error}"),
                })
                .collect();
            self.dead_letter_failures(SYNC_ERRORS, context.run_id, &failures);
        }

        info!(
            store = %self.store,
            created = summary.created,
            disabled = summary.disabled,
            price_updates = summary.price_updates,
            media_updates = summary.media_updates,
            failures = summary.failures,
            "catalog run finished"
        );
        Ok(summary)
    }

    async fn apply_disables(
        &self,
        disables: &[reconcile::DisableAction],
        run_id: Uuid,
    ) -> Result<usize, SyncError> {
        let mut applied = 0;
        for disable_batch in batch::chunk(disables, DISABLE_BATCH_SIZE) {
            let results = join_all(disable_batch.iter().map(|action| async move {
                (
                    action.sku.clone(),
                    self.platform
                        .update_product_status(&action.product_id, ProductStatus::Draft)
                        .await,
                )
            }))
            .await;
            applied += self.settle(results, "status update", run_id)?;
        }
        Ok(applied)
    }

    async fn apply_price_updates(
        &self,
        updates: &[reconcile::PriceUpdate<'_>],
        run_id: Uuid,
    ) -> Result<usize, SyncError> {
        let mut applied = 0;
        for update_batch in batch::chunk(updates, PRICE_BATCH_SIZE) {
            let results = join_all(update_batch.iter().map(|update| async move {
                (
                    update.product.id.clone(),
                    self.platform
                        .update_variant_pricing(&update.product_id, &update.variant_id, update.product)
                        .await,
                )
            }))
            .await;
            applied += self.settle(results, "price update", run_id)?;
        }
        Ok(applied)
    }

    async fn apply_media_updates(
        &self,
        updates: &[reconcile::MediaUpdate],
    ) -> Result<usize, SyncError> {
        let additions: Vec<&reconcile::MediaUpdate> = updates
            .iter()
            .filter(|update| !update.diff.additions.is_empty())
            .collect();
        for add_batch in batch::chunk(&additions, MEDIA_ADD_BATCH_SIZE) {
            let results = join_all(add_batch.iter().map(|update| {
                self.platform
                    .add_product_media(&self.store, &update.product_id, &update.diff.additions)
            }))
            .await;
            for result in results {
                let errors = result?;
                if !errors.is_empty() {
                    warn!(store = %self.store, errors = errors.len(), "media additions reported errors");
                }
            }
        }

        let deletion_ids: Vec<&str> = updates
            .iter()
            .flat_map(|update| update.diff.deletion_ids.iter().map(String::as_str))
            .collect();
        for delete_batch in batch::chunk(&deletion_ids, MEDIA_DELETE_BATCH_SIZE) {
            let (_, errors) = self.platform.delete_files(delete_batch).await?;
            if !errors.is_empty() {
                warn!(store = %self.store, errors = errors.len(), "media deletions reported errors");
            }
        }

        Ok(updates.len())
    }

    /// Count successes; dead-letter per-item platform rejections;
    /// propagate transport failures.
    fn settle(
        &self,
        results: Vec<(String, Result<(), PlatformError>)>,
        step: &str,
        run_id: Uuid,
    ) -> Result<usize, SyncError> {
        let mut applied = 0;
        let mut failures = Vec::new();
        for (sku, result) in results {
            match result {
                Ok(()) => applied += 1,
                Err(PlatformError::UserErrors(errors)) => {
                    let joined = errors
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ");
                    failures.push(ItemFailure {
                        sku,
                        reason: format!("{step} rejected: {joined}"),
                    });
                }
                Err(error) => return Err(error.into()),
            }
        }
        self.dead_letter_failures(SYNC_ERRORS, run_id, &failures);
        Ok(applied)
    }
}
