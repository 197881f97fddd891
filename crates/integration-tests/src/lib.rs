//! Integration tests for Skubridge.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p skubridge-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `feed_reconcile` - Feed parsing through reconcile planning
//! - `metafield_encoding` - Feed attributes through the store profile
//! - `order_relay` - Webhook order decoding and supplier payload shape
//! - `dead_letter` - Dead-letter file rotation and restart behavior
//!
//! All tests here are offline scenario tests; they exercise the crates
//! end to end on fixture data without touching the supplier or Shopify.

pub mod fixtures;
