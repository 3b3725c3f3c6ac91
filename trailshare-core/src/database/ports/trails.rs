use async_trait::async_trait;
use trailshare_model::{Trail, TrailKey};

use crate::error::Result;
use crate::query::TrailQuery;

/// Keyed trail storage with ancestor-scoped queries.
///
/// Writes are plain upserts: concurrent saves of the same key are last
/// write wins, with no version check.
#[async_trait]
pub trait TrailRepository: Send + Sync {
    /// Fetch the trail stored under `key`, or `TrailError::NotFound`.
    async fn load(&self, key: &TrailKey) -> Result<Trail>;

    /// Insert or replace the trail under its own key.
    async fn save(&self, trail: &Trail) -> Result<()>;

    async fn query(&self, query: &TrailQuery) -> Result<Vec<Trail>>;
}
