//! Initial catalog migration and relationship backfill.

use tracing::info;

use super::CliError;

/// Create every current supplier product on the platform.
///
/// Safe to re-run: products that already exist fail creation with a
/// user error and land in the dead-letter files instead of aborting
/// the migration.
pub async fn run(store: &str) -> Result<(), CliError> {
    let service = super::service(store)?;
    let summary = service.run_migration().await?;
    info!(
        store,
        created = summary.created,
        failures = summary.failures,
        relationship_errors = summary.relationship_errors,
        "migration finished"
    );
    Ok(())
}

/// Rewrite relationship metafields across the whole current catalog.
pub async fn relationships(store: &str) -> Result<(), CliError> {
    let service = super::service(store)?;
    let referrers = service.run_relationship_backfill().await?;
    info!(store, referrers, "relationship backfill finished");
    Ok(())
}
