use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::util::{non_empty_var, parse_u32_var};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub geocoder: FileGeocoderConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileGeocoderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Environment-derived configuration values.
///
/// Values are captured raw; parsing and validation happen when the loader
/// composes the final [`Config`](crate::Config).
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub database_url: Option<String>,
    pub database_url_file: Option<PathBuf>,
    pub database_max_connections: Option<u32>,
    pub geocoder_api_key: Option<String>,
    pub geocoder_api_key_file: Option<PathBuf>,
    pub geocoder_endpoint: Option<String>,
    pub geocoder_timeout: Option<String>,
    pub geocoder_language: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: non_empty_var("TRAILSHARE_CONFIG_PATH")
                .map(PathBuf::from),
            database_url: std::env::var("DATABASE_URL").ok(),
            database_url_file: non_empty_var("DATABASE_URL_FILE")
                .map(PathBuf::from),
            database_max_connections: parse_u32_var(
                "DATABASE_MAX_CONNECTIONS",
            ),
            geocoder_api_key: std::env::var("GEOCODER_API_KEY").ok(),
            geocoder_api_key_file: non_empty_var("GEOCODER_API_KEY_FILE")
                .map(PathBuf::from),
            geocoder_endpoint: non_empty_var("GEOCODER_ENDPOINT"),
            geocoder_timeout: non_empty_var("GEOCODER_TIMEOUT"),
            geocoder_language: non_empty_var("GEOCODER_LANGUAGE"),
        }
    }
}
