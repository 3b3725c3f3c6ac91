//! Core data model definitions shared across trailshare crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod error;
pub mod geo;
pub mod ids;
pub mod prelude;
pub mod story;
pub mod trail;

pub use error::{ModelError, Result as ModelResult};
pub use geo::GeoPoint;
pub use ids::{AccountId, TrailKey};
pub use story::{Story, UNCATEGORIZED_TAG};
pub use trail::{Likeness, Trail, TrailKind};
