//! # trailshare-core
//!
//! Query catalog, stores and the evaluation workflow behind the trailshare
//! backend.
//!
//! ## Overview
//!
//! - **Query catalog**: ancestor-scoped [`query::TrailQuery`] values for
//!   pending evaluation rounds, account listings and liked stories
//! - **Stores**: the [`database::TrailRepository`] port with Postgres and
//!   in-memory adapters
//! - **Geocoding**: the [`providers::ReverseGeocoder`] port and a Google
//!   Geocoding client
//! - **Evaluation**: [`evaluation::EvaluationService`] records like/dislike
//!   verdicts and tags liked trails with their location
//!
//! ## Feature Flags
//!
//! - `database` (default): Postgres store and embedded migrations via SQLx
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use trailshare_core::{
//!     database::InMemoryTrailRepository,
//!     evaluation::EvaluationService,
//!     feed::FeedService,
//!     providers::{GoogleGeocoder, GoogleGeocoderSettings},
//! };
//! use trailshare_model::AccountId;
//!
//! async fn like_first_pending(
//!     account: AccountId,
//! ) -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryTrailRepository::new());
//!     let geocoder =
//!         Arc::new(GoogleGeocoder::new(GoogleGeocoderSettings::new("api-key"))?);
//!
//!     let feed = FeedService::new(store.clone());
//!     let evaluation = EvaluationService::new(store, geocoder);
//!
//!     if let Some(trail) = feed.pending_evaluation(account).await?.first() {
//!         evaluation.like(&trail.key().encode()).await?;
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Trail repository port and its adapters
pub mod database;

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Error types shared by the stores and services
pub mod error;

/// Like/dislike workflow with location tagging
pub mod evaluation;

/// Read-side service running catalog queries against a store
pub mod feed;

/// External reverse geocoding providers
pub mod providers;

/// Declarative trail queries and the named query catalog
pub mod query;

pub use error::{Result, TrailError};
pub use evaluation::{EvaluationError, EvaluationService};
pub use feed::FeedService;
