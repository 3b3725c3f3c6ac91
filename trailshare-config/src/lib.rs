//! Configuration library for trailshare.
//!
//! Resolves database and geocoder settings from the environment, an optional
//! `trailshare.toml` and built-in defaults, reads credentials from secret
//! files, and bootstraps `tracing`. Credentials are never defaulted.

pub mod loader;
pub mod models;
pub mod telemetry;
pub mod util;

pub use loader::{ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{Config, ConfigMetadata, DatabaseConfig, GeocoderConfig};
pub use telemetry::{TelemetryError, init_tracing};
