//! Hourly stock sync.

use chrono::{Duration, Utc};
use skubridge_core::batch;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::deadletter::SYNC_ERRORS;
use crate::error::SyncError;
use crate::reconcile::stock;
use crate::shopify::PlatformError;
use crate::supplier::FeedFilter;

use super::{FEED_BATCH_SIZE, ItemFailure, STOCK_BATCH_SIZE, SyncService};

/// Counters for one stock run.
#[derive(Debug, Default)]
pub struct StockSummary {
    pub run_id: Uuid,
    pub feed_records: usize,
    pub adjustments: usize,
}

impl SyncService {
    /// Fetch the last hour's feed changes and apply stock deltas.
    ///
    /// # Errors
    ///
    /// Returns an error when supplier login or the feed fetch fails, or
    /// when an inventory mutation fails at the transport level.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn run_hourly(&self) -> Result<StockSummary, SyncError> {
        let token = self.supplier.login().await?;
        let since = Utc::now() - Duration::hours(1);
        let products = self
            .supplier
            .fetch_products(&token, FeedFilter::UpdatedSince(since))
            .await?;

        let run_id = Uuid::new_v4();
        let mut summary = StockSummary {
            run_id,
            feed_records: products.len(),
            ..StockSummary::default()
        };

        for feed_batch in batch::chunk(&products, FEED_BATCH_SIZE) {
            let skus: Vec<&str> = feed_batch.iter().map(|p| p.id.as_str()).collect();
            let levels = self.platform.stock_by_skus(&skus).await?;
            let changes = stock::stock_changes(feed_batch, &levels, &self.location_id);

            for change_batch in batch::chunk(&changes, STOCK_BATCH_SIZE) {
                match self.platform.adjust_inventory(change_batch).await {
                    Ok(()) => summary.adjustments += change_batch.len(),
                    Err(PlatformError::UserErrors(errors)) => {
                        let joined = errors
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join("; ");
                        let failures: Vec<ItemFailure> = change_batch
                            .iter()
                            .map(|change| ItemFailure {
                                sku: change.inventory_item_id.clone(),
                                reason: format!("stock adjustment rejected: {joined}"),
                            })
                            .collect();
                        self.dead_letter_failures(SYNC_ERRORS, run_id, &failures);
                    }
                    Err(error) => return Err(error.into()),
                }
            }
        }

        info!(
            store = %self.store,
            records = summary.feed_records,
            adjustments = summary.adjustments,
            "stock run finished"
        );
        Ok(summary)
    }
}
