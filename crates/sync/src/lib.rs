//! Skubridge Sync - Supplier/storefront synchronisation engine.
//!
//! This crate owns everything between the supplier's product feed and the
//! commerce platform's Admin API:
//!
//! - [`supplier`] - Feed client: login, filtered product export, order upload
//! - [`shopify`] - Admin GraphQL client: products, inventory, files,
//!   metafields, collections, publications
//! - [`reconcile`] - Pure diffing of feed batches against platform state
//! - [`pipeline`] - The runs themselves: daily catalog sync, hourly stock
//!   sync, initial migration, one-off maintenance
//! - [`relationships`] - Accessory/included/replacement metafield wiring
//! - [`orders`] - Storefront order relay back to the supplier
//! - [`deadletter`] - Per-item failure capture to local JSON files
//! - [`config`] / [`registry`] - Environment wiring and static per-store
//!   data (metafield table, menu taxonomy)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod deadletter;
pub mod error;
pub mod metafields;
pub mod orders;
pub mod pipeline;
pub mod reconcile;
pub mod registry;
pub mod relationships;
pub mod shopify;
pub mod supplier;

pub use config::{StoreConfig, SyncConfig};
pub use error::SyncError;
pub use pipeline::SyncService;
