use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use trailshare_model::{Trail, TrailKey};

use crate::database::ports::trails::TrailRepository;
use crate::error::{Result, TrailError};
use crate::query::TrailQuery;

/// Process-local trail store.
///
/// Queries run through [`TrailQuery::apply`], so filtering, ordering and
/// limits behave like the Postgres adapter. Useful for tests and demos;
/// "store order" for unsorted queries is insertion order.
#[derive(Debug, Default)]
pub struct InMemoryTrailRepository {
    trails: RwLock<HashMap<TrailKey, (u64, Trail)>>,
    sequence: AtomicU64,
    saves: AtomicUsize,
    read_only: AtomicBool,
}

impl InMemoryTrailRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_trails<I>(trails: I) -> Self
    where
        I: IntoIterator<Item = Trail>,
    {
        let repo = Self::new();
        for trail in trails {
            repo.insert(trail).await;
        }
        repo
    }

    /// Seed a trail without counting it as a save.
    pub async fn insert(&self, trail: Trail) {
        let mut trails = self.trails.write().await;
        self.upsert(&mut trails, trail);
    }

    pub async fn get(&self, key: &TrailKey) -> Option<Trail> {
        self.trails
            .read()
            .await
            .get(key)
            .map(|(_, trail)| trail.clone())
    }

    pub async fn len(&self) -> usize {
        self.trails.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.trails.read().await.is_empty()
    }

    /// Number of successful `save` calls so far.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Reject every subsequent `save` with a database error.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    fn upsert(&self, trails: &mut HashMap<TrailKey, (u64, Trail)>, trail: Trail) {
        let key = trail.key();
        let position = match trails.get(&key) {
            Some((position, _)) => *position,
            None => self.sequence.fetch_add(1, Ordering::SeqCst),
        };
        trails.insert(key, (position, trail));
    }
}

#[async_trait]
impl TrailRepository for InMemoryTrailRepository {
    async fn load(&self, key: &TrailKey) -> Result<Trail> {
        self.get(key)
            .await
            .ok_or_else(|| TrailError::NotFound(key.to_string()))
    }

    async fn save(&self, trail: &Trail) -> Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(TrailError::Database(format!(
                "store is read-only, refusing to save {}",
                trail.key()
            )));
        }

        let mut trails = self.trails.write().await;
        self.upsert(&mut trails, trail.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn query(&self, query: &TrailQuery) -> Result<Vec<Trail>> {
        let trails = self.trails.read().await;
        let mut ordered: Vec<_> = trails.values().collect();
        ordered.sort_by_key(|(position, _)| *position);

        let selected =
            query.apply(ordered.into_iter().map(|(_, trail)| trail.clone()));
        debug!(
            account = %query.account,
            matched = selected.len(),
            "in-memory trail query"
        );
        Ok(selected)
    }
}
