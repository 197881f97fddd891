//! Product creation pipeline.
//!
//! Creation is a six-step sequence per batch: stage the batch's document
//! files, create the product records with their metafields and media,
//! then variant pricing, inventory-item weight, opening stock, and
//! publication to every sales channel. A record that fails creation is
//! excluded from the follow-up steps and reported as a failure; follow-up
//! failures leave the product in place and are reported item by item.

use futures::future::join_all;
use skubridge_core::{
    MetafieldInput, PlatformFile, Publication, StockChange, SupplierProduct, batch, media,
};
use tracing::{info, instrument, warn};

use crate::metafields::{document_metafields, encode_product_metafields};
use crate::shopify::{CreatedProduct, PlatformError, StagedFileSource};

use super::{
    CREATE_BATCH_SIZE, FILE_LOOKUP_BATCH_SIZE, FILE_UPLOAD_BATCH_SIZE, ItemFailure,
    PUBLISH_BATCH_SIZE, SyncService,
};

/// Result of a creation pass.
#[derive(Debug, Default)]
pub struct CreateOutcome {
    pub created: Vec<CreatedProduct>,
    pub failures: Vec<ItemFailure>,
}

impl SyncService {
    /// Create every given record, in batches of [`CREATE_BATCH_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns an error on transport-level failures; per-item platform
    /// rejections are collected into the outcome instead.
    #[instrument(skip_all, fields(store = %self.store, records = records.len()))]
    pub async fn create_products(
        &self,
        records: &[&SupplierProduct],
        publications: &[Publication],
    ) -> Result<CreateOutcome, PlatformError> {
        let mut outcome = CreateOutcome::default();
        let mut done = 0;
        for create_batch in batch::chunk(records, CREATE_BATCH_SIZE) {
            self.create_batch(create_batch, publications, &mut outcome)
                .await?;
            done += create_batch.len();
            info!(done, total = records.len(), "products processed");
        }
        Ok(outcome)
    }

    async fn create_batch(
        &self,
        records: &[&SupplierProduct],
        publications: &[Publication],
        outcome: &mut CreateOutcome,
    ) -> Result<(), PlatformError> {
        // Step 1: stage the batch's documents and spare-part sheets
        let uploaded_files = self.stage_batch_files(records).await?;

        // Step 2: create the product records concurrently
        let creations = join_all(records.iter().map(|record| {
            let mut metafields: Vec<MetafieldInput> =
                encode_product_metafields(self.profile, record);
            metafields.extend(document_metafields(&self.store, record, &uploaded_files));
            async move {
                (
                    *record,
                    self.platform.create_product(&self.store, record, &metafields).await,
                )
            }
        }))
        .await;

        let mut created: Vec<(&SupplierProduct, CreatedProduct)> = Vec::new();
        for (record, result) in creations {
            match result {
                Ok(product) => created.push((record, product)),
                Err(PlatformError::UserErrors(errors)) => {
                    outcome.failures.push(ItemFailure {
                        sku: record.id.clone(),
                        reason: format!("product creation rejected: {}", join_errors(&errors)),
                    });
                }
                Err(error) => return Err(error),
            }
        }

        // Step 3: price, compare-at price, SKU and tracking per variant
        let pricing = join_all(created.iter().map(|(record, product)| async move {
            (
                record.id.clone(),
                self.platform
                    .update_variant_pricing(&product.product_id, &product.variant_id, record)
                    .await,
            )
        }))
        .await;
        collect_failures(pricing, "variant pricing", outcome)?;

        // Step 4: inventory-item weight, only for records that carry one
        let weighted = created.iter().filter(|(record, _)| {
            record.attributes.weight.is_some() && record.attributes.weight_unit.is_some()
        });
        let weights = join_all(weighted.map(|(record, product)| async move {
            let weight = record.attributes.weight.unwrap_or_default();
            (
                record.id.clone(),
                self.platform
                    .set_item_weight_kg(&product.inventory_item_id, weight)
                    .await,
            )
        }))
        .await;
        collect_failures(weights, "weight update", outcome)?;

        // Step 5: opening stock for records with availability
        let stocked = opening_stock(&created, &self.location_id);
        if !stocked.is_empty() {
            let changes: Vec<StockChange> =
                stocked.iter().map(|(_, change)| change.clone()).collect();
            match self.platform.adjust_inventory(&changes).await {
                Ok(()) => {}
                Err(PlatformError::UserErrors(errors)) => {
                    // one adjust call covers the batch, attribute to the
                    // records that fed it
                    let reason = format!("opening stock rejected: {}", join_errors(&errors));
                    for (sku, _) in &stocked {
                        outcome.failures.push(ItemFailure {
                            sku: sku.clone(),
                            reason: reason.clone(),
                        });
                    }
                }
                Err(error) => return Err(error),
            }
        }

        // Step 6: publish to every sales channel
        let pairs: Vec<(&str, &str)> = created
            .iter()
            .flat_map(|(_, product)| {
                publications
                    .iter()
                    .map(move |publication| (product.product_id.as_str(), publication.id.as_str()))
            })
            .collect();
        for publish_batch in batch::chunk(&pairs, PUBLISH_BATCH_SIZE) {
            let results = join_all(
                publish_batch
                    .iter()
                    .map(|(product_id, publication_id)| self.platform.publish(product_id, publication_id)),
            )
            .await;
            for result in results {
                let errors = result?;
                if !errors.is_empty() {
                    warn!(store = %self.store, errors = %join_errors(&errors), "publish reported errors");
                }
            }
        }

        outcome
            .created
            .extend(created.into_iter().map(|(_, product)| product));
        Ok(())
    }

    /// Upload the batch's documents that are not yet on the platform, and
    /// return every platform file relevant to the batch (pre-existing and
    /// freshly uploaded) for metafield matching.
    async fn stage_batch_files(
        &self,
        records: &[&SupplierProduct],
    ) -> Result<Vec<PlatformFile>, PlatformError> {
        let all_files: Vec<&str> = records
            .iter()
            .flat_map(|record| {
                record
                    .attributes
                    .media
                    .documents
                    .iter()
                    .chain(&record.attributes.media.spare_parts)
                    .map(|file| file.url.as_str())
            })
            .collect();
        if all_files.is_empty() {
            return Ok(Vec::new());
        }

        // lookup by decorated-name-proof stem
        let stems = batch::dedup(
            &all_files
                .iter()
                .map(|url| media::url_stem(url).replace('%', "_"))
                .collect::<Vec<_>>(),
        );
        let mut uploaded: Vec<PlatformFile> = Vec::new();
        for stem_batch in batch::chunk(&stems, FILE_LOOKUP_BATCH_SIZE) {
            uploaded.extend(self.platform.files_by_filenames(stem_batch).await?);
        }

        let already_uploaded = |url: &str| {
            let marker = format!(
                "Uploaded {} File: {}",
                self.store,
                media::sanitize_file_name(url)
            );
            uploaded
                .iter()
                .any(|file| file.alt.as_deref().is_some_and(|alt| alt.contains(&marker)))
        };
        let remaining: Vec<&str> = all_files
            .iter()
            .copied()
            .filter(|url| !already_uploaded(url))
            .collect();

        // the same document can hang off several records in the batch
        let mut sources: Vec<StagedFileSource> = Vec::new();
        for url in batch::dedup(
            &remaining
                .iter()
                .map(|url| media::sanitize_file_name(url))
                .collect::<Vec<_>>(),
        ) {
            if let Some(original) = remaining
                .iter()
                .find(|candidate| media::sanitize_file_name(candidate) == url)
            {
                sources.push(StagedFileSource::from_url(original));
            }
        }

        for upload_batch in batch::chunk(&sources, FILE_UPLOAD_BATCH_SIZE) {
            uploaded.extend(
                self.platform
                    .upload_supplier_files(&self.store, upload_batch)
                    .await?,
            );
        }

        Ok(uploaded)
    }
}

/// Fold per-item mutation results into the outcome; platform rejections
/// become item failures, transport errors abort.
fn collect_failures(
    results: Vec<(String, Result<(), PlatformError>)>,
    step: &str,
    outcome: &mut CreateOutcome,
) -> Result<(), PlatformError> {
    for (sku, result) in results {
        match result {
            Ok(()) => {}
            Err(PlatformError::UserErrors(errors)) => {
                outcome.failures.push(ItemFailure {
                    sku,
                    reason: format!("{step} rejected: {}", join_errors(&errors)),
                });
            }
            Err(error) => return Err(error),
        }
    }
    Ok(())
}

fn join_errors<E: ToString>(errors: &[E]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Opening-stock adjustments for a creation batch, paired with the SKU of
/// the record behind each one. Records without positive availability
/// contribute nothing and carry no blame when the adjust call is
/// rejected.
fn opening_stock(
    created: &[(&SupplierProduct, CreatedProduct)],
    location_id: &str,
) -> Vec<(String, StockChange)> {
    created
        .iter()
        .filter(|(record, _)| record.attributes.availability > 0)
        .map(|(record, product)| {
            (
                record.id.clone(),
                StockChange {
                    delta: record.attributes.availability,
                    inventory_item_id: product.inventory_item_id.clone(),
                    location_id: location_id.to_string(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn supplier(json: serde_json::Value) -> SupplierProduct {
        serde_json::from_value(json).unwrap()
    }

    fn created(sku: &str) -> CreatedProduct {
        CreatedProduct {
            product_id: format!("gid://shopify/Product/{sku}"),
            variant_id: format!("gid://shopify/ProductVariant/{sku}"),
            inventory_item_id: format!("gid://shopify/InventoryItem/{sku}"),
            sku: sku.to_string(),
        }
    }

    #[test]
    fn test_opening_stock_skips_zero_availability() {
        let in_stock = supplier(serde_json::json!({
            "id": "IN1",
            "attributes": { "name": "Oven", "availability": 4 }
        }));
        let sold_out = supplier(serde_json::json!({
            "id": "OUT1",
            "attributes": { "name": "Fryer", "availability": 0 }
        }));
        let batch = vec![(&in_stock, created("IN1")), (&sold_out, created("OUT1"))];

        let stocked = opening_stock(&batch, "gid://shopify/Location/1");
        let skus: Vec<&str> = stocked.iter().map(|(sku, _)| sku.as_str()).collect();
        assert_eq!(skus, ["IN1"]);
        assert_eq!(stocked[0].1.delta, 4);
        assert_eq!(stocked[0].1.inventory_item_id, "gid://shopify/InventoryItem/IN1");
    }

    #[test]
    fn test_opening_stock_empty_when_nothing_available() {
        let sold_out = supplier(serde_json::json!({
            "id": "OUT1",
            "attributes": { "name": "Fryer" }
        }));
        let batch = vec![(&sold_out, created("OUT1"))];
        assert!(opening_stock(&batch, "gid://shopify/Location/1").is_empty());
    }
}
