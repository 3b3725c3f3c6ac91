pub mod builder;
pub mod catalog;
pub mod types;

pub use builder::TrailQueryBuilder;
pub use catalog::{PENDING_EVALUATION_LIMIT, SamplingCutoff};
pub use types::*;
