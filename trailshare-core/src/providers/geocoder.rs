use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("API error: {0}")]
    Api(String),

    #[error("No address found for coordinates")]
    NoResults,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid API key")]
    InvalidApiKey,

    /// Transport failure, stored without the request URL and its `key=`.
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl GeocodeError {
    pub(crate) fn network(err: reqwest::Error) -> Self {
        GeocodeError::Network(err.without_url())
    }
}

/// Full (long-form) place names for a coordinate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub city: String,
    pub region: String,
    pub country: String,
}

impl Address {
    /// Tags in `[city, region, country]` order.
    pub fn into_tags(self) -> Vec<String> {
        vec![self.city, self.region, self.country]
    }
}

/// Turns a latitude/longitude pair into a postal-style address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse_geocode(
        &self,
        lat: f64,
        lng: f64,
    ) -> Result<Address, GeocodeError>;
}
