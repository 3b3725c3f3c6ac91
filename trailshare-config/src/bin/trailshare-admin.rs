use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use trailshare_config::{
    Config, ConfigLoader, ConfigLoaderOptions, init_tracing,
    telemetry::DEFAULT_FILTER,
};
use trailshare_core::database::PostgresTrailRepository;
use trailshare_core::providers::{GoogleGeocoder, ReverseGeocoder};

#[derive(Parser)]
#[command(name = "trailshare-admin", about = "trailshare operations helper")]
struct Cli {
    /// Explicit TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Env file loaded before reading the environment
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate configuration and print the effective settings
    Check,
    /// Apply pending database migrations
    Migrate,
    /// Reverse geocode a coordinate with the configured provider
    Geocode {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(DEFAULT_FILTER)?;

    let config = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: cli.config,
        env_file: cli.env_file,
    })
    .load()
    .context("failed to load configuration")?;

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "loaded configuration file");
    }

    match cli.command {
        Command::Check => check(&config),
        Command::Migrate => migrate(&config).await,
        Command::Geocode { lat, lng } => geocode(config, lat, lng).await,
    }
}

fn check(config: &Config) -> Result<()> {
    println!(
        "database: {}",
        config
            .database
            .redacted_url()
            .unwrap_or_else(|| "<not configured>".to_string())
    );
    println!("database max connections: {}", config.database.max_connections);
    println!("geocoder endpoint: {}", config.geocoder.endpoint);
    println!(
        "geocoder timeout: {}",
        humantime::format_duration(config.geocoder.timeout)
    );
    if let Some(language) = &config.geocoder.language {
        println!("geocoder language: {language}");
    }
    Ok(())
}

async fn migrate(config: &Config) -> Result<()> {
    let Some(url) = config.database.url.as_deref() else {
        bail!("no database configured; set DATABASE_URL or [database] url");
    };
    PostgresTrailRepository::connect(url, config.database.max_connections)
        .await
        .context("failed to migrate trail database")?;
    info!("trail database is up to date");
    Ok(())
}

async fn geocode(config: Config, lat: f64, lng: f64) -> Result<()> {
    let geocoder = GoogleGeocoder::new(config.geocoder.into())?;
    let address = geocoder
        .reverse_geocode(lat, lng)
        .await
        .with_context(|| format!("reverse geocoding ({lat}, {lng}) failed"))?;
    println!("{}", address.into_tags().join(", "));
    Ok(())
}
