//! Skubridge Core - Shared domain types.
//!
//! This crate provides the types used across all skubridge components:
//! - `sync` - Supplier/platform clients, reconciliation engine, pipelines
//! - `server` - Order webhook and scheduled sync jobs
//! - `cli` - One-off migration and maintenance commands
//!
//! # Architecture
//!
//! The core crate contains only types and small pure helpers - no I/O, no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Supplier feed and commerce-platform product models
//! - [`batch`] - Fixed-size chunking and order-preserving de-duplication
//! - [`media`] - Filename-stem helpers for the media diff heuristic

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod batch;
pub mod media;
pub mod types;

pub use types::*;
