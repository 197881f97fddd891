//! Cross-product relationship edges.

use serde::{Deserialize, Serialize};

/// The kind of reference a product makes to another product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// Product is usable together with the referenced product.
    Accessory,
    /// Referenced product ships as part of this bundle.
    IncludedProduct,
    /// Referenced product supersedes this one.
    Replacement,
}

/// A directed edge between two supplier SKUs.
///
/// Edges are derived from feed attributes and resolved to platform object
/// ids only at write time; a `to_sku` with no platform counterpart is
/// dropped during resolution, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub from_sku: String,
    pub to_sku: String,
    pub kind: RelationshipKind,
}
