use super::types::*;
use chrono::{DateTime, Utc};
use trailshare_model::{AccountId, Likeness};

/// Fluent API for building trail queries
#[derive(Debug, Clone)]
pub struct TrailQueryBuilder {
    query: TrailQuery,
}

impl TrailQueryBuilder {
    /// Start a query scoped to the trails of `account`
    pub fn new(account: AccountId) -> Self {
        Self {
            query: TrailQuery::for_account(account),
        }
    }

    // === Filter methods ===

    /// Only trails created strictly after `instant`
    pub fn created_after(mut self, instant: DateTime<Utc>) -> Self {
        self.query.filters.created_after = Some(instant);
        self
    }

    /// Only trails carrying the given verdict
    pub fn likeness(mut self, likeness: Likeness) -> Self {
        self.query.filters.likeness = Some(likeness);
        self
    }

    /// Convenience method for trails nobody has judged yet
    pub fn not_evaluated(self) -> Self {
        self.likeness(Likeness::NotEvaluated)
    }

    /// Convenience method for liked trails
    pub fn liked(self) -> Self {
        self.likeness(Likeness::Liked)
    }

    // === Sort methods ===

    pub fn sort_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.query.sort = Some(SortCriteria { field, order });
        self
    }

    /// Oldest first
    pub fn chronological(self) -> Self {
        self.sort_by(SortField::CreatedAt, SortOrder::Ascending)
    }

    // === Pagination ===

    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(limit);
        self
    }

    pub fn build(self) -> TrailQuery {
        self.query
    }
}
