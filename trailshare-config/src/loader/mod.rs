pub mod error;
pub mod secrets;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use trailshare_core::providers::google::{
    DEFAULT_GEOCODE_TIMEOUT, GOOGLE_REVERSE_GEOCODE_ENDPOINT,
};
use url::Url;

use crate::{
    models::{
        Config, ConfigMetadata, DEFAULT_MAX_CONNECTIONS, DatabaseConfig,
        GeocoderConfig,
        sources::{EnvConfig, FileConfig, FileGeocoderConfig},
    },
    util::non_blank,
};
use error::ConfigLoadError;
use secrets::{resolve_database_url, resolve_geocoder_key};

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] =
    ["trailshare.toml", "config/trailshare.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

/// Builds a [`Config`] from environment variables, an optional TOML file and
/// built-in defaults, in that order of precedence.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env` (if present), gather the process environment and compose.
    pub fn load(&self) -> Result<Config, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let mut config = self.load_with_env(EnvConfig::gather())?;
        config.metadata.env_file_loaded = env_file_loaded;
        Ok(config)
    }

    /// Compose against an explicit environment snapshot; no `.env` handling.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<Config, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        compose(file_config.unwrap_or_default(), env, config_path)
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn compose(
    file: FileConfig,
    env: EnvConfig,
    config_path: Option<PathBuf>,
) -> Result<Config, ConfigLoadError> {
    let database = DatabaseConfig {
        url: resolve_database_url(&env, &file.database)?,
        max_connections: env
            .database_max_connections
            .or(file.database.max_connections)
            .filter(|max| *max > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS),
    };

    let geocoder = compose_geocoder(&env, &file.geocoder)?;

    Ok(Config {
        database,
        geocoder,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded: false,
        },
    })
}

fn compose_geocoder(
    env: &EnvConfig,
    file: &FileGeocoderConfig,
) -> Result<GeocoderConfig, ConfigLoadError> {
    let api_key = resolve_geocoder_key(env, file)?;

    let endpoint_raw = non_blank(env.geocoder_endpoint.as_deref())
        .or_else(|| non_blank(file.endpoint.as_deref()))
        .unwrap_or(GOOGLE_REVERSE_GEOCODE_ENDPOINT);
    let endpoint = Url::parse(endpoint_raw).map_err(|source| {
        ConfigLoadError::InvalidGeocoderEndpoint {
            value: endpoint_raw.to_string(),
            source,
        }
    })?;

    let env_timeout = non_blank(env.geocoder_timeout.as_deref())
        .map(|raw| {
            humantime::parse_duration(raw).map_err(|source| {
                ConfigLoadError::InvalidGeocoderTimeout {
                    value: raw.to_string(),
                    source,
                }
            })
        })
        .transpose()?;
    // A zero timeout would fail every request; treat it as unset.
    let timeout = env_timeout
        .or(file.timeout_secs.map(Duration::from_secs))
        .filter(|timeout| !timeout.is_zero())
        .unwrap_or(DEFAULT_GEOCODE_TIMEOUT);

    let language = non_blank(env.geocoder_language.as_deref())
        .or_else(|| non_blank(file.language.as_deref()))
        .map(str::to_string);

    Ok(GeocoderConfig {
        api_key,
        endpoint,
        timeout,
        language,
    })
}
