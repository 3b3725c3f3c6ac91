use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trailshare_model::{AccountId, Likeness, Trail};

/// Ancestor-scoped trail query understood by every store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailQuery {
    pub account: AccountId,
    pub filters: TrailFilters,
    pub sort: Option<SortCriteria>,
    pub limit: Option<usize>,
}

/// Trail filtering options. Unset filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrailFilters {
    /// Strictly newer than this instant.
    pub created_after: Option<DateTime<Utc>>,
    pub likeness: Option<Likeness>,
}

/// Sort criteria for queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriteria {
    pub field: SortField,
    pub order: SortOrder,
}

/// Fields available for sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CreatedAt,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
        }
    }
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

impl TrailQuery {
    /// Every trail under `account`, default order, no limit.
    pub fn for_account(account: AccountId) -> Self {
        Self {
            account,
            filters: TrailFilters::default(),
            sort: None,
            limit: None,
        }
    }

    /// Whether `trail` passes the ancestor scope and every filter.
    pub fn matches(&self, trail: &Trail) -> bool {
        if trail.account != self.account {
            return false;
        }

        if let Some(after) = self.filters.created_after
            && trail.created_at <= after
        {
            return false;
        }

        if let Some(likeness) = self.filters.likeness
            && trail.likeness != likeness
        {
            return false;
        }

        true
    }

    /// Evaluate the query over an in-memory collection: filter, then a
    /// stable sort, then the limit.
    pub fn apply<I>(&self, trails: I) -> Vec<Trail>
    where
        I: IntoIterator<Item = Trail>,
    {
        let mut selected: Vec<Trail> =
            trails.into_iter().filter(|t| self.matches(t)).collect();

        if let Some(sort) = self.sort {
            selected.sort_by(|a, b| {
                let ordering = match sort.field {
                    SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                };
                match sort.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }

        selected
    }
}
