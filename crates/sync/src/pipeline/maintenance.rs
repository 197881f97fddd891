//! One-off catalog maintenance operations, driven by the CLI binary.

use std::collections::HashSet;
use std::time::Duration;

use futures::future::join_all;
use serde_json::Value;
use skubridge_core::{EXCLUDED_SKU_SUFFIXES, MetafieldInput, SupplierProduct, batch};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::deadletter::{DeadLetterRecord, MISSING_PRODUCTS};
use crate::error::SyncError;
use crate::registry::StoreProfile;
use crate::shopify::{CreatedCollection, MenuItemInput, handleize};
use crate::supplier::FeedFilter;

use super::{PRICE_BATCH_SIZE, SKU_LOOKUP_BATCH_SIZE, SyncService};

/// Products per page when scanning the whole catalog.
const PRODUCT_SCAN_PAGE_SIZE: u32 = 200;
/// SKU terms per products query during the file-metafield rewrite.
const FILE_METAFIELD_LOOKUP_BATCH_SIZE: usize = 150;
/// `metafieldsSet` accepts at most 25 inputs.
const METAFIELD_BATCH_SIZE: usize = 25;
/// Duplicates deleted concurrently.
const DELETE_BATCH_SIZE: usize = 3;
/// Collections created concurrently.
const COLLECTION_BATCH_SIZE: usize = 5;
/// Collection-publication pairs published per batch.
const COLLECTION_PUBLISH_BATCH_SIZE: usize = 25;
/// Collection title rewrites applied concurrently.
const COLLECTION_RENAME_BATCH_SIZE: usize = 10;
/// Pause between collection-publication batches; publishing collections
/// is heavily throttled.
const COLLECTION_PUBLISH_DELAY: Duration = Duration::from_secs(3);
/// File ids per `fileDelete` during image cleanup.
const IMAGE_CLEANUP_DELETE_BATCH_SIZE: usize = 50;

/// Thumbnail decorations the image cleanup removes; only full-size
/// images belong in the file library.
const THUMBNAIL_MARKERS: &[&str] = &["-thumb_", "-thumb-gallery_"];

impl SyncService {
    /// Compare the supplier's full SKU list against the platform and
    /// dead-letter every SKU without a platform product.
    ///
    /// # Errors
    ///
    /// Returns an error when supplier login, the feed fetch, or a
    /// platform query fails.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn check_missing_products(&self) -> Result<usize, SyncError> {
        let token = self.supplier.login().await?;
        let products = self
            .supplier
            .fetch_products(&token, FeedFilter::CurrentCatalog)
            .await?;
        let skus: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();

        let run_id = Uuid::new_v4();
        let mut missing = 0;
        for sku_batch in batch::chunk(&skus, SKU_LOOKUP_BATCH_SIZE) {
            let found: HashSet<String> = self
                .platform
                .sku_refs_by_skus(sku_batch)
                .await?
                .into_iter()
                .map(|sku_ref| sku_ref.sku)
                .collect();
            for sku in sku_batch {
                if !found.contains(*sku) {
                    missing += 1;
                    let record = DeadLetterRecord::new(
                        run_id,
                        &self.store,
                        "product missing on platform".to_string(),
                    )
                    .with_sku(sku);
                    if let Err(error) = self.dead_letter.record(MISSING_PRODUCTS, &record) {
                        warn!(sku, %error, "failed to record missing product");
                    }
                }
            }
        }

        info!(store = %self.store, total = skus.len(), missing, "missing-product audit finished");
        Ok(missing)
    }

    /// Scan every platform product and return the SKUs that occur more
    /// than once.
    ///
    /// # Errors
    ///
    /// Returns an error when a platform page query fails.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn find_duplicate_skus(&self) -> Result<Vec<String>, SyncError> {
        let refs = self.platform.all_sku_refs(PRODUCT_SCAN_PAGE_SIZE).await?;
        let skus: Vec<String> = refs.into_iter().map(|sku_ref| sku_ref.sku).collect();
        Ok(batch::duplicates(&skus))
    }

    /// Delete the liquidation/duplicate products (SKU suffix `LIQ` or
    /// `2EME`). Deletion only proceeds when every such SKU resolved to a
    /// product id; a partial resolution means the scan raced a
    /// concurrent change and deleting would be guesswork.
    ///
    /// # Errors
    ///
    /// Returns an error when a platform query or deletion fails at the
    /// transport level.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn delete_duplicate_products(&self) -> Result<usize, SyncError> {
        let refs = self.platform.all_sku_refs(PRODUCT_SCAN_PAGE_SIZE).await?;
        let delete_skus: Vec<&str> = refs
            .iter()
            .map(|sku_ref| sku_ref.sku.as_str())
            .filter(|sku| EXCLUDED_SKU_SUFFIXES.iter().any(|suffix| sku.ends_with(suffix)))
            .collect();
        if delete_skus.is_empty() {
            return Ok(0);
        }

        let mut found_ids = Vec::new();
        for sku_batch in batch::chunk(&delete_skus, SKU_LOOKUP_BATCH_SIZE) {
            let found = self.platform.sku_refs_by_skus(sku_batch).await?;
            found_ids.extend(found.into_iter().map(|sku_ref| sku_ref.id));
        }

        if found_ids.len() != delete_skus.len() {
            warn!(
                store = %self.store,
                expected = delete_skus.len(),
                resolved = found_ids.len(),
                "duplicate resolution incomplete, skipping deletion"
            );
            return Ok(0);
        }

        let mut deleted = 0;
        for id_batch in batch::chunk(&found_ids, DELETE_BATCH_SIZE) {
            let results = join_all(id_batch.iter().map(|id| self.platform.delete_product(id))).await;
            for result in results {
                match result {
                    Ok(()) => deleted += 1,
                    Err(error) => warn!(store = %self.store, %error, "product deletion failed"),
                }
            }
        }

        info!(store = %self.store, deleted, "duplicate deletion finished");
        Ok(deleted)
    }

    /// Rewrite every product's price and compare-at price from the
    /// current feed.
    ///
    /// # Errors
    ///
    /// Returns an error when supplier login, the feed fetch, or a
    /// variant mutation fails.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn rewrite_all_prices(&self) -> Result<usize, SyncError> {
        let token = self.supplier.login().await?;
        let products = self
            .supplier
            .fetch_products(&token, FeedFilter::CurrentCatalog)
            .await?;

        let mut updated = 0;
        for feed_batch in batch::chunk(&products, PRICE_BATCH_SIZE) {
            let skus: Vec<&str> = feed_batch.iter().map(|p| p.id.as_str()).collect();
            let platform_products = self.platform.products_by_skus(&skus).await?;

            let matched: Vec<(&SupplierProduct, &str, &str)> = feed_batch
                .iter()
                .filter_map(|record| {
                    platform_products
                        .iter()
                        .find(|p| p.variant.sku == record.id)
                        .map(|p| (record, p.id.as_str(), p.variant.id.as_str()))
                })
                .collect();

            let results = join_all(matched.iter().map(|(record, product_id, variant_id)| {
                self.platform.update_variant_pricing(product_id, variant_id, record)
            }))
            .await;
            for result in results {
                result?;
                updated += 1;
            }
            info!(store = %self.store, updated, total = products.len(), "prices rewritten");
        }
        Ok(updated)
    }

    /// Rewrite the `json_documents`/`json_spare_parts` metafields from
    /// the current feed, for every product that carries documents.
    ///
    /// # Errors
    ///
    /// Returns an error when supplier login, the feed fetch, or a
    /// platform call fails.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn rewrite_file_metafields(&self) -> Result<usize, SyncError> {
        let token = self.supplier.login().await?;
        let products = self
            .supplier
            .fetch_products(&token, FeedFilter::CurrentCatalog)
            .await?;

        let with_files: Vec<&SupplierProduct> = products
            .iter()
            .filter(|record| {
                !record.attributes.media.documents.is_empty()
                    || !record.attributes.media.spare_parts.is_empty()
            })
            .collect();
        if with_files.is_empty() {
            return Ok(0);
        }

        let skus: Vec<&str> = with_files.iter().map(|record| record.id.as_str()).collect();
        let mut resolved = Vec::new();
        for sku_batch in batch::chunk(&skus, FILE_METAFIELD_LOOKUP_BATCH_SIZE) {
            resolved.extend(self.platform.sku_refs_by_skus(sku_batch).await?);
        }

        let mut metafields: Vec<MetafieldInput> = Vec::new();
        for record in &with_files {
            let Some(owner) = resolved.iter().find(|sku_ref| sku_ref.sku == record.id) else {
                continue;
            };
            let documents = &record.attributes.media.documents;
            if !documents.is_empty() {
                metafields.push(
                    MetafieldInput::product("json_documents", "json", files_json(documents))
                        .with_owner(&owner.id),
                );
            }
            let spare_parts = &record.attributes.media.spare_parts;
            if !spare_parts.is_empty() {
                metafields.push(
                    MetafieldInput::product("json_spare_parts", "json", files_json(spare_parts))
                        .with_owner(&owner.id),
                );
            }
        }

        let mut written = 0;
        for metafield_batch in batch::chunk(&metafields, METAFIELD_BATCH_SIZE) {
            let errors = self.platform.set_metafields(metafield_batch).await?;
            written += metafield_batch.len() - errors.len();
            if !errors.is_empty() {
                warn!(store = %self.store, errors = errors.len(), "file metafields rejected");
            }
        }
        Ok(written)
    }

    /// Create one smart collection per range/subrange pair of the
    /// store's taxonomy and publish every created collection to every
    /// sales channel. Returns the created collections for the menu step.
    ///
    /// # Errors
    ///
    /// Returns an error when collection creation reports user errors
    /// (duplicate titles, usually), the store has no publications, or a
    /// platform call fails.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn create_store_collections(
        &self,
    ) -> Result<Vec<CreatedCollection>, SyncError> {
        let pairs: Vec<(&str, &str)> = self
            .profile
            .product_menu
            .iter()
            .flat_map(|range| range.subranges.iter().map(|subrange| (range.name, *subrange)))
            .collect();

        let mut created = Vec::new();
        for pair_batch in batch::chunk(&pairs, COLLECTION_BATCH_SIZE) {
            let results = join_all(pair_batch.iter().map(|(range, subrange)| {
                self.platform.create_collection(
                    range,
                    subrange,
                    self.profile.range_definition_id,
                    self.profile.subrange_definition_id,
                )
            }))
            .await;
            for result in results {
                created.push(result?);
            }
            info!(store = %self.store, created = created.len(), total = pairs.len(), "collections created");
        }

        let publications = self.platform.publications().await?;
        if publications.is_empty() {
            return Err(SyncError::NoPublications(self.store.clone()));
        }
        let publish_pairs: Vec<(&str, &str)> = created
            .iter()
            .flat_map(|collection| {
                publications
                    .iter()
                    .map(move |publication| (collection.id.as_str(), publication.id.as_str()))
            })
            .collect();
        for publish_batch in batch::chunk(&publish_pairs, COLLECTION_PUBLISH_BATCH_SIZE) {
            let results = join_all(
                publish_batch
                    .iter()
                    .map(|(collection_id, publication_id)| {
                        self.platform.publish(collection_id, publication_id)
                    }),
            )
            .await;
            for result in results {
                let errors = result?;
                if !errors.is_empty() {
                    warn!(store = %self.store, errors = errors.len(), "collection publish rejected");
                }
            }
            tokio::time::sleep(COLLECTION_PUBLISH_DELAY).await;
        }

        Ok(created)
    }

    /// Rewrite existing collection titles from the internal
    /// `{range}_{subrange}` names to their customer-facing display
    /// names, deriving fresh handles alongside. Collections the store
    /// does not have are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error when the collection scan fails; individual
    /// rejected rewrites are warned and skipped.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn rename_store_collections(&self) -> Result<usize, SyncError> {
        let collections = self
            .platform
            .all_collections(PRODUCT_SCAN_PAGE_SIZE)
            .await?;
        let renames = plan_collection_renames(self.profile, &collections);
        info!(
            store = %self.store,
            scanned = collections.len(),
            matches = renames.len(),
            "collection rename planned"
        );

        let mut renamed = 0;
        for rename_batch in batch::chunk(&renames, COLLECTION_RENAME_BATCH_SIZE) {
            let results = join_all(rename_batch.iter().map(|rename| async move {
                (
                    rename,
                    self.platform
                        .update_collection(&rename.id, &rename.title, &rename.handle)
                        .await,
                )
            }))
            .await;
            for (rename, result) in results {
                match result {
                    Ok(()) => renamed += 1,
                    Err(error) => {
                        warn!(store = %self.store, title = %rename.title, %error, "collection rename failed");
                    }
                }
            }
            info!(store = %self.store, renamed, total = renames.len(), "collections renamed");
        }
        Ok(renamed)
    }

    /// Create the storefront navigation menu from the taxonomy,
    /// resolving each range/subrange pair to its collection by title.
    ///
    /// # Errors
    ///
    /// Returns an error when the collection scan or the menu mutation
    /// fails.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn create_store_menu(&self) -> Result<String, SyncError> {
        let collections = self
            .platform
            .all_collections(PRODUCT_SCAN_PAGE_SIZE)
            .await?;

        let items: Vec<MenuItemInput> = self
            .profile
            .product_menu
            .iter()
            .map(|range| {
                let children = range
                    .subranges
                    .iter()
                    .filter_map(|subrange| {
                        let title = format!("{}_{subrange}", range.name);
                        collections
                            .iter()
                            .find(|collection| collection.title == title)
                            .map(|collection| MenuItemInput::collection(subrange, &collection.id))
                    })
                    .collect();
                MenuItemInput::frontpage(range.name, children)
            })
            .collect();

        let menu_id = self
            .platform
            .create_menu(self.profile.menu_title, self.profile.menu_handle, &items)
            .await?;
        info!(store = %self.store, menu_id, "menu created");
        Ok(menu_id)
    }

    /// Delete thumbnail-decorated image files from the file library.
    ///
    /// # Errors
    ///
    /// Returns an error when the image scan or a deletion call fails at
    /// the transport level.
    #[instrument(skip(self), fields(store = %self.store))]
    pub async fn cleanup_thumbnail_images(&self) -> Result<usize, SyncError> {
        let images = self.platform.all_image_files().await?;
        let delete_ids: Vec<&str> = images
            .iter()
            .filter(|image| THUMBNAIL_MARKERS.iter().any(|marker| image.url.contains(marker)))
            .map(|image| image.id.as_str())
            .collect();
        info!(store = %self.store, scanned = images.len(), matches = delete_ids.len(), "thumbnail scan finished");

        let mut deleted = 0;
        for delete_batch in batch::chunk(&delete_ids, IMAGE_CLEANUP_DELETE_BATCH_SIZE) {
            let (deleted_ids, errors) = self.platform.delete_files(delete_batch).await?;
            deleted += deleted_ids.len();
            if !errors.is_empty() {
                warn!(store = %self.store, errors = errors.len(), "image deletion rejected");
            }
        }
        Ok(deleted)
    }
}

fn files_json(files: &[skubridge_core::SupplierFile]) -> String {
    let urls: Vec<Value> = files
        .iter()
        .map(|file| serde_json::json!({ "url": file.url }))
        .collect();
    Value::from(urls).to_string()
}

/// A planned title/handle rewrite for one existing collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRename {
    pub id: String,
    pub title: String,
    pub handle: String,
}

/// Match the profile's flattened range/subrange pairs, by position,
/// against the parallel display-name list, and keep the pairs whose
/// internal-titled collection exists on the store.
fn plan_collection_renames(
    profile: &StoreProfile,
    collections: &[CreatedCollection],
) -> Vec<CollectionRename> {
    profile
        .product_menu
        .iter()
        .flat_map(|range| {
            range
                .subranges
                .iter()
                .map(|subrange| format!("{}_{subrange}", range.name))
        })
        .zip(profile.collection_display_names)
        .filter_map(|(internal_title, display_name)| {
            collections
                .iter()
                .find(|collection| collection.title == internal_title)
                .map(|collection| CollectionRename {
                    id: collection.id.clone(),
                    title: (*display_name).to_string(),
                    handle: handleize(display_name),
                })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::registry::profile;

    fn collection(id: &str, title: &str) -> CreatedCollection {
        CreatedCollection {
            id: id.to_string(),
            title: title.to_string(),
            handle: handleize(title),
        }
    }

    #[test]
    fn test_rename_plan_maps_internal_titles_to_display_names() {
        let diamond = profile("DIAMOND").unwrap();
        let collections = vec![collection(
            "gid://shopify/Collection/1",
            "Kochgeräte_Baeckereioefen",
        )];

        let renames = plan_collection_renames(diamond, &collections);
        assert_eq!(
            renames,
            vec![CollectionRename {
                id: "gid://shopify/Collection/1".to_string(),
                title: "Bäckereiöfen".to_string(),
                handle: "bäckereiöfen".to_string(),
            }]
        );
    }

    #[test]
    fn test_rename_plan_skips_collections_outside_the_taxonomy() {
        let diamond = profile("DIAMOND").unwrap();
        let collections = vec![
            collection("gid://shopify/Collection/7", "Frontpage"),
            collection("gid://shopify/Collection/8", "Bäckereiöfen"),
        ];
        assert!(plan_collection_renames(diamond, &collections).is_empty());
    }

    #[test]
    fn test_rename_plan_covers_every_pair_when_all_exist() {
        let diamond = profile("DIAMOND").unwrap();
        let collections: Vec<CreatedCollection> = diamond
            .product_menu
            .iter()
            .flat_map(|range| {
                range
                    .subranges
                    .iter()
                    .map(|subrange| format!("{}_{subrange}", range.name))
            })
            .enumerate()
            .map(|(index, title)| collection(&format!("gid://shopify/Collection/{index}"), &title))
            .collect();

        let renames = plan_collection_renames(diamond, &collections);
        assert_eq!(renames.len(), diamond.collection_display_names.len());
    }
}
