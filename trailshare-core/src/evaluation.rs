use std::{any::type_name_of_val, fmt, sync::Arc};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use trailshare_model::{Likeness, Trail, TrailKey, UNCATEGORIZED_TAG};

use crate::{
    database::ports::trails::TrailRepository, error::TrailError,
    providers::ReverseGeocoder,
};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Records like/dislike verdicts and tags liked trails with their location.
pub struct EvaluationService<R, G>
where
    R: TrailRepository + ?Sized,
    G: ReverseGeocoder + ?Sized,
{
    repository: Arc<R>,
    geocoder: Arc<G>,
    clock: Clock,
}

impl<R, G> Clone for EvaluationService<R, G>
where
    R: TrailRepository + ?Sized,
    G: ReverseGeocoder + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            geocoder: Arc::clone(&self.geocoder),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, G> fmt::Debug for EvaluationService<R, G>
where
    R: TrailRepository + ?Sized,
    G: ReverseGeocoder + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationService")
            .field("repository", &type_name_of_val(self.repository.as_ref()))
            .field("geocoder", &type_name_of_val(self.geocoder.as_ref()))
            .finish()
    }
}

impl<R, G> EvaluationService<R, G>
where
    R: TrailRepository + ?Sized,
    G: ReverseGeocoder + ?Sized,
{
    pub fn new(repository: Arc<R>, geocoder: Arc<G>) -> Self {
        Self {
            repository,
            geocoder,
            clock: Arc::new(Utc::now),
        }
    }

    /// Override the evaluation timestamp source (primarily for tests).
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub async fn like(&self, trail_id: &str) -> Result<Trail, EvaluationError> {
        self.evaluate(trail_id, Likeness::Liked).await
    }

    pub async fn dislike(
        &self,
        trail_id: &str,
    ) -> Result<Trail, EvaluationError> {
        self.evaluate(trail_id, Likeness::Disliked).await
    }

    /// Load the trail behind `trail_id`, stamp `verdict`, enrich liked trails
    /// with location tags and write it back.
    ///
    /// Load and save failures are returned as-is with no retry. A failed
    /// geocode never fails the evaluation; the trail is tagged
    /// [`UNCATEGORIZED_TAG`] instead.
    pub async fn evaluate(
        &self,
        trail_id: &str,
        verdict: Likeness,
    ) -> Result<Trail, EvaluationError> {
        if !verdict.is_evaluated() {
            return Err(EvaluationError::InvalidVerdict(verdict));
        }

        let key = TrailKey::decode(trail_id).map_err(|err| {
            warn!(trail_id, error = %err, "rejected malformed trail id");
            EvaluationError::Load(TrailError::from(err))
        })?;

        let mut trail = self.repository.load(&key).await.map_err(|err| {
            error!(trail = %key, error = %err, "failed to load trail for evaluation");
            EvaluationError::Load(err)
        })?;

        trail
            .record_verdict(verdict, (self.clock)())
            .map_err(|_| EvaluationError::InvalidVerdict(verdict))?;

        if verdict == Likeness::Liked && trail.has_location() {
            trail.tags = self.location_tags(&trail).await;
        }

        self.repository.save(&trail).await.map_err(|err| {
            error!(trail = %key, error = %err, "failed to save evaluated trail");
            EvaluationError::Save(err)
        })?;

        info!(
            trail = %key,
            verdict = %verdict,
            tags = ?trail.tags,
            "recorded trail evaluation"
        );
        Ok(trail)
    }

    async fn location_tags(&self, trail: &Trail) -> Vec<String> {
        let point = trail.geo_point;
        match self.geocoder.reverse_geocode(point.lat, point.lng).await {
            Ok(address) => address.into_tags(),
            Err(err) => {
                warn!(
                    trail = %trail.key(),
                    lat = point.lat,
                    lng = point.lng,
                    error = %err,
                    "reverse geocoding failed; tagging trail as uncategorized"
                );
                vec![UNCATEGORIZED_TAG.to_string()]
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("{0} is not a verdict")]
    InvalidVerdict(Likeness),
    #[error("failed to load trail: {0}")]
    Load(#[source] TrailError),
    #[error("failed to save trail: {0}")]
    Save(#[source] TrailError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryTrailRepository;
    use crate::providers::geocoder::{Address, GeocodeError, MockReverseGeocoder};
    use chrono::{Duration, TimeZone};
    use mockall::predicate::eq;
    use trailshare_model::{AccountId, GeoPoint, TrailKind};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
    }

    fn trail_at(point: GeoPoint) -> Trail {
        let mut trail = Trail::new(
            AccountId::new(),
            "rev-1",
            TrailKind::Photo,
            fixed_now() - Duration::days(3),
        );
        trail.path = "/media/rev-1.jpg".into();
        trail.geo_point = point;
        trail
    }

    fn san_francisco() -> Address {
        Address {
            city: "San Francisco".into(),
            region: "California".into(),
            country: "United States".into(),
        }
    }

    async fn service_for(
        trail: Trail,
        geocoder: MockReverseGeocoder,
    ) -> (
        Arc<InMemoryTrailRepository>,
        EvaluationService<InMemoryTrailRepository, MockReverseGeocoder>,
    ) {
        let repo = Arc::new(InMemoryTrailRepository::with_trails([trail]).await);
        let service = EvaluationService::new(repo.clone(), Arc::new(geocoder))
            .with_clock(fixed_now);
        (repo, service)
    }

    #[tokio::test]
    async fn like_with_location_tags_city_region_country() {
        let trail = trail_at(GeoPoint::new(37.77, -122.41));
        let id = trail.key().encode();

        let mut geocoder = MockReverseGeocoder::new();
        geocoder
            .expect_reverse_geocode()
            .with(eq(37.77), eq(-122.41))
            .times(1)
            .returning(|_, _| Ok(san_francisco()));

        let (repo, service) = service_for(trail.clone(), geocoder).await;
        let liked = service.like(&id).await.unwrap();

        assert_eq!(liked.likeness, Likeness::Liked);
        assert_eq!(liked.evaluated_on, Some(fixed_now()));
        assert_eq!(liked.tags, ["San Francisco", "California", "United States"]);

        let stored = repo.get(&trail.key()).await.unwrap();
        assert_eq!(stored, liked);
        assert_eq!(repo.saves(), 1);
    }

    #[tokio::test]
    async fn like_without_location_skips_geocoder() {
        let trail = trail_at(GeoPoint::ZERO);
        let id = trail.key().encode();

        let mut geocoder = MockReverseGeocoder::new();
        geocoder.expect_reverse_geocode().never();

        let (_repo, service) = service_for(trail, geocoder).await;
        let liked = service.like(&id).await.unwrap();

        assert_eq!(liked.likeness, Likeness::Liked);
        assert!(liked.tags.is_empty());
    }

    #[tokio::test]
    async fn geocoder_failure_falls_back_to_uncategorized() {
        let trail = trail_at(GeoPoint::new(-33.86, 151.21));
        let id = trail.key().encode();

        let mut geocoder = MockReverseGeocoder::new();
        geocoder
            .expect_reverse_geocode()
            .times(1)
            .returning(|_, _| Err(GeocodeError::RateLimited));

        let (repo, service) = service_for(trail, geocoder).await;
        let liked = service.like(&id).await.unwrap();

        assert_eq!(liked.likeness, Likeness::Liked);
        assert_eq!(liked.tags, [UNCATEGORIZED_TAG]);
        assert_eq!(repo.saves(), 1);
    }

    #[tokio::test]
    async fn dislike_never_geocodes() {
        let trail = trail_at(GeoPoint::new(48.85, 2.35));
        let id = trail.key().encode();

        let mut geocoder = MockReverseGeocoder::new();
        geocoder.expect_reverse_geocode().never();

        let (repo, service) = service_for(trail, geocoder).await;
        let disliked = service.dislike(&id).await.unwrap();

        assert_eq!(disliked.likeness, Likeness::Disliked);
        assert_eq!(disliked.evaluated_on, Some(fixed_now()));
        assert!(disliked.tags.is_empty());
        assert_eq!(repo.saves(), 1);
    }

    #[tokio::test]
    async fn unknown_trail_fails_to_load_without_saving() {
        let mut geocoder = MockReverseGeocoder::new();
        geocoder.expect_reverse_geocode().never();
        let (repo, service) =
            service_for(trail_at(GeoPoint::ZERO), geocoder).await;

        let missing = TrailKey::new(AccountId::new(), "missing").encode();
        let err = service.like(&missing).await.unwrap_err();

        assert!(matches!(err, EvaluationError::Load(TrailError::NotFound(_))));
        assert_eq!(repo.saves(), 0);
    }

    #[tokio::test]
    async fn malformed_id_is_a_load_error() {
        let geocoder = MockReverseGeocoder::new();
        let (repo, service) =
            service_for(trail_at(GeoPoint::ZERO), geocoder).await;

        let err = service.dislike("not a key!").await.unwrap_err();

        assert!(matches!(err, EvaluationError::Load(TrailError::Model(_))));
        assert_eq!(repo.saves(), 0);
    }

    #[tokio::test]
    async fn save_failure_is_returned() {
        let trail = trail_at(GeoPoint::ZERO);
        let id = trail.key().encode();
        let (repo, service) =
            service_for(trail.clone(), MockReverseGeocoder::new()).await;
        repo.set_read_only(true);

        let err = service.dislike(&id).await.unwrap_err();

        assert!(matches!(err, EvaluationError::Save(TrailError::Database(_))));
        let stored = repo.get(&trail.key()).await.unwrap();
        assert_eq!(stored.likeness, Likeness::NotEvaluated);
    }

    #[tokio::test]
    async fn not_evaluated_is_rejected_before_io() {
        let trail = trail_at(GeoPoint::ZERO);
        let id = trail.key().encode();
        let (repo, service) =
            service_for(trail, MockReverseGeocoder::new()).await;

        let err = service
            .evaluate(&id, Likeness::NotEvaluated)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EvaluationError::InvalidVerdict(Likeness::NotEvaluated)
        ));
        assert_eq!(repo.saves(), 0);
    }

    #[tokio::test]
    async fn re_evaluation_overwrites_previous_verdict() {
        let trail = trail_at(GeoPoint::ZERO);
        let id = trail.key().encode();
        let (_repo, service) =
            service_for(trail, MockReverseGeocoder::new()).await;

        service.like(&id).await.unwrap();
        let second = service.dislike(&id).await.unwrap();

        assert_eq!(second.likeness, Likeness::Disliked);
    }
}
