use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::geocoder::{Address, GeocodeError, ReverseGeocoder};

pub const GOOGLE_REVERSE_GEOCODE_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/geocode/json";
pub const DEFAULT_GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`GoogleGeocoder`]. The API key is supplied by
/// configuration and is redacted from `Debug` output.
#[derive(Clone)]
pub struct GoogleGeocoderSettings {
    pub api_key: String,
    pub endpoint: Url,
    pub timeout: Duration,
    pub language: Option<String>,
}

impl GoogleGeocoderSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: default_endpoint(),
            timeout: DEFAULT_GEOCODE_TIMEOUT,
            language: None,
        }
    }
}

pub fn default_endpoint() -> Url {
    Url::parse(GOOGLE_REVERSE_GEOCODE_ENDPOINT)
        .expect("static endpoint is a valid url")
}

impl fmt::Debug for GoogleGeocoderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleGeocoderSettings")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .field("language", &self.language)
            .finish()
    }
}

/// Reverse geocoding through the Google Geocoding web service.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    http: reqwest::Client,
    settings: GoogleGeocoderSettings,
}

impl GoogleGeocoder {
    pub fn new(settings: GoogleGeocoderSettings) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(GeocodeError::network)?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &GoogleGeocoderSettings {
        &self.settings
    }
}

#[async_trait]
impl ReverseGeocoder for GoogleGeocoder {
    async fn reverse_geocode(
        &self,
        lat: f64,
        lng: f64,
    ) -> Result<Address, GeocodeError> {
        let mut query = vec![
            ("latlng", format!("{lat},{lng}")),
            ("key", self.settings.api_key.clone()),
        ];
        if let Some(language) = &self.settings.language {
            query.push(("language", language.clone()));
        }

        let response = self
            .http
            .get(self.settings.endpoint.clone())
            .query(&query)
            .send()
            .await
            .map_err(GeocodeError::network)?;

        let status = response.status();
        match status.as_u16() {
            401 | 403 => return Err(GeocodeError::InvalidApiKey),
            429 => return Err(GeocodeError::RateLimited),
            _ if !status.is_success() => {
                return Err(GeocodeError::Api(format!(
                    "geocode request failed with status {status}"
                )));
            }
            _ => {}
        }

        let body = response.text().await.map_err(GeocodeError::network)?;
        let address = parse_response(&body)?;
        debug!(lat, lng, city = %address.city, "reverse geocoded trail location");
        Ok(address)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}

/// Map a geocode JSON body to an [`Address`].
///
/// Results are ordered most-specific first; each field takes the first
/// component of the wanted type across all results.
pub(crate) fn parse_response(body: &str) -> Result<Address, GeocodeError> {
    let response: GeocodeResponse = serde_json::from_str(body)
        .map_err(|err| GeocodeError::Parse(err.to_string()))?;

    let detail = || {
        response
            .error_message
            .clone()
            .unwrap_or_else(|| response.status.clone())
    };

    match response.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" => return Err(GeocodeError::NoResults),
        "REQUEST_DENIED" => return Err(GeocodeError::InvalidApiKey),
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => {
            return Err(GeocodeError::RateLimited);
        }
        _ => return Err(GeocodeError::Api(detail())),
    }

    let find = |kinds: &[&str]| -> String {
        kinds
            .iter()
            .find_map(|kind| {
                response
                    .results
                    .iter()
                    .flat_map(|result| result.address_components.iter())
                    .find(|component| {
                        component.types.iter().any(|t| t.as_str() == *kind)
                    })
                    .map(|component| component.long_name.clone())
            })
            .unwrap_or_default()
    };

    let address = Address {
        city: find(&["locality", "postal_town"]),
        region: find(&["administrative_area_level_1"]),
        country: find(&["country"]),
    };

    if address == Address::default() {
        return Err(GeocodeError::NoResults);
    }

    Ok(address)
}
