//! Command implementations and shared bootstrap.

use std::sync::Arc;

use skubridge_sync::config::ConfigError;
use skubridge_sync::deadletter::FileSink;
use skubridge_sync::{SyncConfig, SyncError, SyncService};
use thiserror::Error;

pub mod maintenance;
pub mod migrate;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error("store {0} is not listed in STORES")]
    UnknownStore(String),
}

/// Load configuration and build the sync service for the named store.
pub fn service(store: &str) -> Result<SyncService, CliError> {
    let config = SyncConfig::from_env()?;
    let store_config = config
        .store_by_name(store)
        .ok_or_else(|| CliError::UnknownStore(store.to_string()))?;
    let dead_letter = Arc::new(FileSink::new(&config.log_dir));
    Ok(SyncService::new(store_config, dead_letter))
}
