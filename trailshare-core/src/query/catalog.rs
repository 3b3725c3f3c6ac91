//! Named trail queries, each scoped to one account.

use chrono::{DateTime, Duration, Months, Utc};
use rand::Rng;
use trailshare_model::AccountId;

use super::builder::TrailQueryBuilder;
use super::types::TrailQuery;

/// Upper bound on trails handed out for a single evaluation round.
pub const PENDING_EVALUATION_LIMIT: usize = 6;

/// The cutoff lands up to this many months in the past (exclusive).
pub const CUTOFF_MONTH_SPAN: u32 = 108;

/// Extra days subtracted on top of the months (exclusive).
pub const CUTOFF_DAY_SPAN: u32 = 30;

/// Random creation-date cutoff used to sample pending trails.
///
/// The store has no "random sample" primitive, so the pending query asks
/// for the oldest unevaluated trails newer than a random instant. This only
/// samples among trails newer than the cutoff: trails older than every
/// possible cutoff are still reachable, but recent ones are favoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingCutoff {
    pub months_back: u32,
    pub days_back: u32,
}

impl SamplingCutoff {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            months_back: rng.random_range(0..CUTOFF_MONTH_SPAN),
            days_back: rng.random_range(0..CUTOFF_DAY_SPAN),
        }
    }

    /// Resolve against `now`. Month arithmetic clamps to the end of
    /// shorter months.
    pub fn resolve(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(self.months_back))
            .and_then(|instant| {
                instant.checked_sub_signed(Duration::days(i64::from(
                    self.days_back,
                )))
            })
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Unevaluated trails created after `cutoff`, oldest first, at most
/// [`PENDING_EVALUATION_LIMIT`].
pub fn pending_evaluation(
    account: AccountId,
    cutoff: DateTime<Utc>,
) -> TrailQuery {
    TrailQueryBuilder::new(account)
        .created_after(cutoff)
        .not_evaluated()
        .chronological()
        .limit(PENDING_EVALUATION_LIMIT)
        .build()
}

/// [`pending_evaluation`] with a freshly drawn cutoff relative to now.
pub fn pending_evaluation_now(account: AccountId) -> TrailQuery {
    let cutoff = SamplingCutoff::random(&mut rand::rng()).resolve(Utc::now());
    pending_evaluation(account, cutoff)
}

/// Every trail of the account in store order.
pub fn all_for_account(account: AccountId) -> TrailQuery {
    TrailQueryBuilder::new(account).build()
}

/// Liked trails, oldest first; the backing query of a story.
pub fn liked_stories(account: AccountId) -> TrailQuery {
    TrailQueryBuilder::new(account).liked().chronological().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{SortField, SortOrder};
    use chrono::TimeZone;
    use rand::{SeedableRng, rngs::StdRng};
    use trailshare_model::Likeness;

    #[test]
    fn pending_query_shape() {
        let account = AccountId::new();
        let cutoff = Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap();
        let query = pending_evaluation(account, cutoff);

        assert_eq!(query.account, account);
        assert_eq!(query.filters.created_after, Some(cutoff));
        assert_eq!(query.filters.likeness, Some(Likeness::NotEvaluated));
        let sort = query.sort.unwrap();
        assert_eq!(sort.field, SortField::CreatedAt);
        assert_eq!(sort.order, SortOrder::Ascending);
        assert_eq!(query.limit, Some(PENDING_EVALUATION_LIMIT));
    }

    #[test]
    fn all_for_account_has_no_filters() {
        let account = AccountId::new();
        let query = all_for_account(account);
        assert_eq!(query, TrailQuery::for_account(account));
        assert!(query.sort.is_none());
        assert!(query.limit.is_none());
    }

    #[test]
    fn liked_stories_is_chronological_and_unbounded() {
        let query = liked_stories(AccountId::new());
        assert_eq!(query.filters.likeness, Some(Likeness::Liked));
        assert!(query.filters.created_after.is_none());
        assert_eq!(query.sort.unwrap().order, SortOrder::Ascending);
        assert!(query.limit.is_none());
    }

    #[test]
    fn random_cutoff_stays_within_window() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let earliest = now
            .checked_sub_months(Months::new(CUTOFF_MONTH_SPAN))
            .unwrap()
            - Duration::days(i64::from(CUTOFF_DAY_SPAN));

        for _ in 0..500 {
            let cutoff = SamplingCutoff::random(&mut rng);
            assert!(cutoff.months_back < CUTOFF_MONTH_SPAN);
            assert!(cutoff.days_back < CUTOFF_DAY_SPAN);

            let instant = cutoff.resolve(now);
            assert!(instant <= now);
            assert!(instant > earliest);
        }
    }

    #[test]
    fn zero_cutoff_resolves_to_now() {
        let now = Utc::now();
        let cutoff = SamplingCutoff {
            months_back: 0,
            days_back: 0,
        };
        assert_eq!(cutoff.resolve(now), now);
    }

    #[test]
    fn cutoff_subtracts_months_then_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 8, 30, 0).unwrap();
        let cutoff = SamplingCutoff {
            months_back: 14,
            days_back: 10,
        };
        assert_eq!(
            cutoff.resolve(now),
            Utc.with_ymd_and_hms(2023, 1, 5, 8, 30, 0).unwrap()
        );
    }
}
