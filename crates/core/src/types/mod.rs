//! Domain types shared across the workspace.

mod metafield;
mod platform;
mod relationship;
mod supplier;

pub use metafield::*;
pub use platform::*;
pub use relationship::*;
pub use supplier::*;
