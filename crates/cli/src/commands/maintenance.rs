//! One-off catalog maintenance commands.

use tracing::{info, warn};

use super::CliError;

/// Report supplier SKUs with no platform product.
pub async fn check_missing(store: &str) -> Result<(), CliError> {
    let service = super::service(store)?;
    let missing = service.check_missing_products().await?;
    if missing == 0 {
        info!(store, "no missing products");
    } else {
        warn!(store, missing, "missing products recorded to dead-letter files");
    }
    Ok(())
}

/// Report SKUs that occur on more than one platform product.
pub async fn find_duplicates(store: &str) -> Result<(), CliError> {
    let service = super::service(store)?;
    let duplicates = service.find_duplicate_skus().await?;
    if duplicates.is_empty() {
        info!(store, "no duplicate SKUs");
    } else {
        warn!(store, count = duplicates.len(), skus = ?duplicates, "duplicate SKUs found");
    }
    Ok(())
}

/// Delete liquidation-suffixed duplicate products.
pub async fn delete_duplicates(store: &str) -> Result<(), CliError> {
    let service = super::service(store)?;
    let deleted = service.delete_duplicate_products().await?;
    info!(store, deleted, "duplicate deletion finished");
    Ok(())
}

/// Rewrite every product's prices from the current feed.
pub async fn update_prices(store: &str) -> Result<(), CliError> {
    let service = super::service(store)?;
    let updated = service.rewrite_all_prices().await?;
    info!(store, updated, "price rewrite finished");
    Ok(())
}

/// Rewrite document metafields from the current feed.
pub async fn update_file_metafields(store: &str) -> Result<(), CliError> {
    let service = super::service(store)?;
    let written = service.rewrite_file_metafields().await?;
    info!(store, written, "file metafield rewrite finished");
    Ok(())
}

/// Create one smart collection per range/subrange pair and publish
/// them to every sales channel.
pub async fn create_collections(store: &str) -> Result<(), CliError> {
    let service = super::service(store)?;
    let created = service.create_store_collections().await?;
    info!(store, created = created.len(), "collections created and published");
    Ok(())
}

/// Create the storefront navigation menu from existing collections.
pub async fn create_menu(store: &str) -> Result<(), CliError> {
    let service = super::service(store)?;
    let menu_id = service.create_store_menu().await?;
    info!(store, menu_id, "menu created");
    Ok(())
}

/// Rewrite collection titles and handles to their customer-facing
/// display names.
pub async fn rename_collections(store: &str) -> Result<(), CliError> {
    let service = super::service(store)?;
    let renamed = service.rename_store_collections().await?;
    info!(store, renamed, "collection rename finished");
    Ok(())
}

/// Delete thumbnail-decorated images from the file library.
pub async fn cleanup_images(store: &str) -> Result<(), CliError> {
    let service = super::service(store)?;
    let deleted = service.cleanup_thumbnail_images().await?;
    info!(store, deleted, "image cleanup finished");
    Ok(())
}
