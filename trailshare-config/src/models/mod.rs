pub mod sources;

use std::{fmt, path::PathBuf, time::Duration};

use trailshare_core::providers::GoogleGeocoderSettings;
use url::Url;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub geocoder: GeocoderConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `None` means no Postgres store is configured.
    pub url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// The connection URL with any password replaced, for logs.
    pub fn redacted_url(&self) -> Option<String> {
        let mut url = Url::parse(self.url.as_deref()?).ok()?;
        if url.password().is_some() && url.set_password(Some("***")).is_err() {
            return Some("<redacted>".to_string());
        }
        Some(url.to_string())
    }
}

#[derive(Clone)]
pub struct GeocoderConfig {
    pub api_key: String,
    pub endpoint: Url,
    pub timeout: Duration,
    pub language: Option<String>,
}

impl fmt::Debug for GeocoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocoderConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .field("language", &self.language)
            .finish()
    }
}

impl From<&GeocoderConfig> for GoogleGeocoderSettings {
    fn from(value: &GeocoderConfig) -> Self {
        GoogleGeocoderSettings {
            api_key: value.api_key.clone(),
            endpoint: value.endpoint.clone(),
            timeout: value.timeout,
            language: value.language.clone(),
        }
    }
}

impl From<GeocoderConfig> for GoogleGeocoderSettings {
    fn from(value: GeocoderConfig) -> Self {
        GoogleGeocoderSettings {
            api_key: value.api_key,
            endpoint: value.endpoint,
            timeout: value.timeout,
            language: value.language,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
