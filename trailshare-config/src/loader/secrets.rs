use std::{fs::read_to_string, path::Path};

use url::Url;

use crate::{
    ConfigLoadError,
    models::sources::{EnvConfig, FileDatabaseConfig, FileGeocoderConfig},
    util::non_blank,
};

/// Resolve the Postgres URL: `DATABASE_URL`, then `DATABASE_URL_FILE`, then
/// `[database] url`. Whatever wins must parse with a postgres scheme.
pub fn resolve_database_url(
    env: &EnvConfig,
    file_database: &FileDatabaseConfig,
) -> Result<Option<String>, ConfigLoadError> {
    let raw = if let Some(url) = non_blank(env.database_url.as_deref()) {
        Some(url.to_string())
    } else if let Some(path) = env.database_url_file.as_ref()
        && let Some(url) = read_secret_file(path)?
    {
        Some(url)
    } else {
        non_blank(file_database.url.as_deref()).map(str::to_string)
    };

    let Some(raw) = raw else {
        return Ok(None);
    };

    let parsed = Url::parse(&raw)
        .map_err(|source| ConfigLoadError::InvalidDatabaseUrl { source })?;
    match parsed.scheme() {
        "postgres" | "postgresql" => Ok(Some(raw)),
        other => Err(ConfigLoadError::UnsupportedDatabaseScheme {
            scheme: other.to_string(),
        }),
    }
}

/// Resolve the geocoder API key: `GEOCODER_API_KEY`, then
/// `GEOCODER_API_KEY_FILE`, then `[geocoder] api_key_file`.
pub fn resolve_geocoder_key(
    env: &EnvConfig,
    file_geocoder: &FileGeocoderConfig,
) -> Result<String, ConfigLoadError> {
    if let Some(key) = non_blank(env.geocoder_api_key.as_deref()) {
        return Ok(key.to_string());
    }

    for path in [
        env.geocoder_api_key_file.as_ref(),
        file_geocoder.api_key_file.as_ref(),
    ]
    .into_iter()
    .flatten()
    {
        if let Some(secret) = read_secret_file(path)? {
            return Ok(secret);
        }
    }

    Err(ConfigLoadError::MissingGeocoderKey)
}

/// Read a secret file, trimming surrounding whitespace. An empty file
/// yields `None`.
pub fn read_secret_file(
    path: &Path,
) -> Result<Option<String>, ConfigLoadError> {
    let contents = read_to_string(path).map_err(|source| {
        ConfigLoadError::SecretFileIo {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
