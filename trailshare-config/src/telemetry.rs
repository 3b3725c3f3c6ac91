use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, filter::ParseError, layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info,sqlx=warn,reqwest=warn";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid tracing filter: {0}")]
    InvalidFilter(#[from] ParseError),
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Install the global subscriber: `RUST_LOG` (falling back to
/// `default_filter`) feeding the fmt layer.
pub fn init_tracing(default_filter: &str) -> Result<(), TelemetryError> {
    let filter =
        resolve_filter(std::env::var("RUST_LOG").ok(), default_filter)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}

fn resolve_filter(
    rust_log: Option<String>,
    default_filter: &str,
) -> Result<EnvFilter, ParseError> {
    if let Some(directives) = rust_log.filter(|raw| !raw.trim().is_empty())
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return Ok(filter);
    }
    EnvFilter::try_new(default_filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn rust_log_wins_over_default() {
        let filter =
            resolve_filter(Some("trailshare_core=trace".into()), "warn")
                .unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn unparsable_rust_log_uses_default() {
        let filter =
            resolve_filter(Some("trailshare_core=loud".into()), "debug")
                .unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn invalid_default_is_reported() {
        assert!(resolve_filter(None, "trailshare_core=loud").is_err());
    }

    #[test]
    fn second_install_is_rejected() {
        let _ = init_tracing(DEFAULT_FILTER);
        assert!(matches!(
            init_tracing(DEFAULT_FILTER),
            Err(TelemetryError::AlreadyInitialized(_))
        ));
    }
}
