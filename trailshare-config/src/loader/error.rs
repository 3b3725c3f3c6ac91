use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid database URL")]
    InvalidDatabaseUrl {
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported database URL scheme '{scheme}'")]
    UnsupportedDatabaseScheme { scheme: String },
    #[error("invalid geocoder endpoint '{value}'")]
    InvalidGeocoderEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid geocoder timeout '{value}'")]
    InvalidGeocoderTimeout {
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error(
        "no geocoder API key configured; set GEOCODER_API_KEY, \
         GEOCODER_API_KEY_FILE or [geocoder] api_key_file"
    )]
    MissingGeocoderKey,
    #[error("failed to read secret file {path}")]
    SecretFileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
