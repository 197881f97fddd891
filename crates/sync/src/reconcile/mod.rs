//! Pure reconciliation planning.
//!
//! One plan is computed per feed batch from a single platform read; the
//! writes happen afterwards, in the pipelines. Nothing in this module
//! performs I/O, which is what makes the action-set rules testable.
//!
//! Run-scoped state lives in an explicit [`RunContext`] carried through
//! the batches: the disable rule must not re-disable a product the same
//! run just created, and that is the only cross-batch coupling.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use skubridge_core::{PlatformProduct, SupplierProduct};
use uuid::Uuid;

pub mod media;
pub mod stock;

pub use media::MediaDiff;

/// State threaded through the batches of one sync run.
#[derive(Debug)]
pub struct RunContext {
    /// Identifier stamped onto dead-letter records of this run.
    pub run_id: Uuid,
    created_skus: HashSet<String>,
}

impl RunContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            created_skus: HashSet::new(),
        }
    }

    /// Record a SKU created earlier in this run.
    pub fn mark_created(&mut self, sku: &str) {
        self.created_skus.insert(sku.to_string());
    }

    #[must_use]
    pub fn was_created(&self, sku: &str) -> bool {
        self.created_skus.contains(sku)
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A planned status transition to DRAFT.
#[derive(Debug, Clone)]
pub struct DisableAction {
    pub product_id: String,
    pub sku: String,
}

/// A planned price rewrite; promo becomes the price, catalog the
/// compare-at price.
#[derive(Debug)]
pub struct PriceUpdate<'a> {
    pub product_id: String,
    pub variant_id: String,
    pub product: &'a SupplierProduct,
}

/// Planned media additions/deletions for one matched product.
#[derive(Debug)]
pub struct MediaUpdate {
    pub product_id: String,
    pub sku: String,
    pub diff: MediaDiff,
}

/// The action sets for one batch. The sets are disjoint by construction:
/// creation applies only to unmatched records, everything else only to
/// matched ones, and a record is never both disabled and price-updated
/// because disabling requires `is_old` while the other sets are computed
/// regardless of it on matched live products.
#[derive(Debug, Default)]
pub struct ReconcilePlan<'a> {
    pub creates: Vec<&'a SupplierProduct>,
    pub disables: Vec<DisableAction>,
    pub price_updates: Vec<PriceUpdate<'a>>,
    pub media_updates: Vec<MediaUpdate>,
}

impl ReconcilePlan<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty()
            && self.disables.is_empty()
            && self.price_updates.is_empty()
            && self.media_updates.is_empty()
    }
}

/// Compute the action sets for one feed batch against the matching
/// platform page.
#[must_use]
pub fn plan_batch<'a>(
    batch: &'a [SupplierProduct],
    platform: &[PlatformProduct],
    context: &RunContext,
) -> ReconcilePlan<'a> {
    let by_sku: HashMap<&str, &PlatformProduct> = platform
        .iter()
        .map(|product| (product.variant.sku.as_str(), product))
        .collect();

    let mut plan = ReconcilePlan::default();

    for record in batch {
        let Some(existing) = by_sku.get(record.id.as_str()) else {
            if !record.attributes.is_old && !record.has_excluded_suffix() {
                plan.creates.push(record);
            }
            continue;
        };

        if record.attributes.is_old
            && !existing.is_draft()
            && !context.was_created(&record.id)
        {
            plan.disables.push(DisableAction {
                product_id: existing.id.clone(),
                sku: record.id.clone(),
            });
        }

        if price_changed(existing.variant.compare_at_price, record) {
            plan.price_updates.push(PriceUpdate {
                product_id: existing.id.clone(),
                variant_id: existing.variant.id.clone(),
                product: record,
            });
        }

        let diff = media::diff(&record.big_image_urls(), &existing.media);
        if !diff.is_empty() {
            plan.media_updates.push(MediaUpdate {
                product_id: existing.id.clone(),
                sku: record.id.clone(),
                diff,
            });
        }
    }

    plan
}

/// Numeric comparison of the platform compare-at price against the feed's
/// catalog price. `"100.00"` and `100` are the same price.
fn price_changed(compare_at: Option<Decimal>, record: &SupplierProduct) -> bool {
    compare_at.unwrap_or_default() != record.attributes.price.catalog_or_zero()
}
