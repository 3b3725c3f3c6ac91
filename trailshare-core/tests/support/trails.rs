use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use trailshare_core::providers::{Address, GeocodeError, ReverseGeocoder};
use trailshare_model::{AccountId, GeoPoint, Likeness, Trail, TrailKind};

pub fn trail(account: AccountId, revision: &str, age: Duration) -> Trail {
    let mut trail =
        Trail::new(account, revision, TrailKind::Photo, Utc::now() - age);
    trail.path = format!("/media/{revision}.jpg");
    trail.mime_type = "image/jpeg".into();
    trail.bytes = 512 * 1024;
    trail
}

pub fn located(
    account: AccountId,
    revision: &str,
    age: Duration,
    lat: f64,
    lng: f64,
) -> Trail {
    let mut trail = trail(account, revision, age);
    trail.geo_point = GeoPoint::new(lat, lng);
    trail
}

pub fn evaluated(
    account: AccountId,
    revision: &str,
    age: Duration,
    verdict: Likeness,
) -> Trail {
    let mut trail = trail(account, revision, age);
    trail
        .record_verdict(verdict, Utc::now())
        .expect("fixture verdict");
    trail
}

/// Geocoder double returning a canned answer and recording every lookup.
pub struct StubGeocoder {
    answer: Result<Address, ()>,
    calls: Mutex<Vec<(f64, f64)>>,
}

impl StubGeocoder {
    pub fn resolving(city: &str, region: &str, country: &str) -> Self {
        Self {
            answer: Ok(Address {
                city: city.into(),
                region: region.into(),
                country: country.into(),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: Err(()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(f64, f64)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl ReverseGeocoder for StubGeocoder {
    async fn reverse_geocode(
        &self,
        lat: f64,
        lng: f64,
    ) -> Result<Address, GeocodeError> {
        self.calls.lock().expect("calls lock").push((lat, lng));
        self.answer
            .clone()
            .map_err(|_| GeocodeError::Api("UNKNOWN_ERROR".into()))
    }
}

pub fn within(actual: DateTime<Utc>, expected: DateTime<Utc>) -> bool {
    (actual - expected).abs() <= Duration::seconds(5)
}
