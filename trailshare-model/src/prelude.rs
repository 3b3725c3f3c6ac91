//! Snapshot of the model surface for handler and service crates.
//! Prefer importing from this module instead of individual tree nodes.

pub use super::error::ModelError;
pub use super::geo::GeoPoint;
pub use super::ids::{AccountId, TrailKey};
pub use super::story::{Story, UNCATEGORIZED_TAG};
pub use super::trail::{Likeness, Trail, TrailKind};
