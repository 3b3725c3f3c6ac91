use std::{any::type_name_of_val, fmt, sync::Arc};

use chrono::{DateTime, Utc};
use tracing::debug;
use trailshare_model::{AccountId, Story, Trail};

use crate::database::ports::trails::TrailRepository;
use crate::error::Result;
use crate::query::{TrailQuery, catalog};

/// Read side of the trail store: evaluation rounds, listings and stories.
pub struct FeedService<R: TrailRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R> Clone for FeedService<R>
where
    R: TrailRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> fmt::Debug for FeedService<R>
where
    R: TrailRepository + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedService")
            .field("repository", &type_name_of_val(self.repository.as_ref()))
            .finish()
    }
}

impl<R> FeedService<R>
where
    R: TrailRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Next batch of trails to evaluate, sampled behind a fresh random
    /// cutoff.
    pub async fn pending_evaluation(
        &self,
        account: AccountId,
    ) -> Result<Vec<Trail>> {
        self.run(catalog::pending_evaluation_now(account)).await
    }

    pub async fn pending_evaluation_since(
        &self,
        account: AccountId,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Trail>> {
        self.run(catalog::pending_evaluation(account, cutoff)).await
    }

    pub async fn all_for_account(
        &self,
        account: AccountId,
    ) -> Result<Vec<Trail>> {
        self.run(catalog::all_for_account(account)).await
    }

    pub async fn liked_trails(&self, account: AccountId) -> Result<Vec<Trail>> {
        self.run(catalog::liked_stories(account)).await
    }

    pub async fn story_for(&self, account: AccountId) -> Result<Story> {
        let story = Story::from_trails(self.liked_trails(account).await?);
        debug!(
            account = %account,
            trails = story.len(),
            title = %story.title,
            "assembled story"
        );
        Ok(story)
    }

    async fn run(&self, query: TrailQuery) -> Result<Vec<Trail>> {
        self.repository.query(&query).await
    }
}
