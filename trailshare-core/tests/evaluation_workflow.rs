use std::sync::Arc;

use chrono::{Duration, Utc};
use trailshare_core::database::{InMemoryTrailRepository, TrailRepository};
use trailshare_core::evaluation::{EvaluationError, EvaluationService};
use trailshare_core::error::TrailError;
use trailshare_model::{AccountId, Likeness, TrailKey, UNCATEGORIZED_TAG};

#[path = "support/mod.rs"]
mod support;

use support::trails::{StubGeocoder, located, trail, within};

#[tokio::test]
async fn like_in_san_francisco_tags_the_trail() -> anyhow::Result<()> {
    let account = AccountId::new();
    let subject = located(account, "golden-gate", Duration::days(2), 37.77, -122.41);
    let store = Arc::new(InMemoryTrailRepository::with_trails([subject.clone()]).await);
    let geocoder = Arc::new(StubGeocoder::resolving(
        "San Francisco",
        "California",
        "United States",
    ));
    let service = EvaluationService::new(store.clone(), geocoder.clone());

    let updated = service.like(&subject.key().encode()).await?;

    assert_eq!(updated.likeness, Likeness::Liked);
    assert!(within(updated.evaluated_on.expect("evaluated_on"), Utc::now()));
    assert_eq!(updated.tags, ["San Francisco", "California", "United States"]);
    assert_eq!(geocoder.calls(), [(37.77, -122.41)]);

    let stored = store.load(&subject.key()).await?;
    assert_eq!(stored, updated);
    Ok(())
}

#[tokio::test]
async fn like_at_null_island_skips_geocoding() -> anyhow::Result<()> {
    let account = AccountId::new();
    let subject = trail(account, "indoors", Duration::hours(6));
    let store = Arc::new(InMemoryTrailRepository::with_trails([subject.clone()]).await);
    let geocoder = Arc::new(StubGeocoder::resolving("x", "y", "z"));
    let service = EvaluationService::new(store, geocoder.clone());

    let updated = service.like(&subject.key().encode()).await?;

    assert_eq!(updated.likeness, Likeness::Liked);
    assert!(updated.tags.is_empty());
    assert!(geocoder.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn failed_geocode_still_records_the_like() -> anyhow::Result<()> {
    let account = AccountId::new();
    let subject = located(account, "harbour", Duration::days(1), -33.86, 151.21);
    let store = Arc::new(InMemoryTrailRepository::with_trails([subject.clone()]).await);
    let service =
        EvaluationService::new(store.clone(), Arc::new(StubGeocoder::failing()));

    let updated = service.like(&subject.key().encode()).await?;

    assert_eq!(updated.likeness, Likeness::Liked);
    assert_eq!(updated.tags, [UNCATEGORIZED_TAG]);
    assert_eq!(store.saves(), 1);
    Ok(())
}

#[tokio::test]
async fn dislike_ignores_location() -> anyhow::Result<()> {
    let account = AccountId::new();
    let subject = located(account, "bridge", Duration::days(1), 51.50, -0.12);
    let store = Arc::new(InMemoryTrailRepository::with_trails([subject.clone()]).await);
    let geocoder = Arc::new(StubGeocoder::resolving("London", "England", "UK"));
    let service = EvaluationService::new(store, geocoder.clone());

    let updated = service.dislike(&subject.key().encode()).await?;

    assert_eq!(updated.likeness, Likeness::Disliked);
    assert!(updated.evaluated_on.is_some());
    assert!(updated.tags.is_empty());
    assert!(geocoder.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_trail_is_not_saved() {
    let store = Arc::new(InMemoryTrailRepository::new());
    let service = EvaluationService::new(
        store.clone(),
        Arc::new(StubGeocoder::resolving("a", "b", "c")),
    );
    let missing = TrailKey::new(AccountId::new(), "ghost").encode();

    let err = service.like(&missing).await.unwrap_err();

    assert!(matches!(err, EvaluationError::Load(TrailError::NotFound(_))));
    assert_eq!(store.saves(), 0);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn trail_ids_are_scoped_to_their_account() {
    let owner = AccountId::new();
    let subject = trail(owner, "private", Duration::days(1));
    let store = Arc::new(InMemoryTrailRepository::with_trails([subject]).await);
    let service =
        EvaluationService::new(store.clone(), Arc::new(StubGeocoder::failing()));

    let foreign = TrailKey::new(AccountId::new(), "private").encode();
    let err = service.dislike(&foreign).await.unwrap_err();

    assert!(matches!(err, EvaluationError::Load(_)));
    assert_eq!(store.saves(), 0);
}
