use thiserror::Error;
use trailshare_model::ModelError;

#[derive(Error, Debug)]
pub enum TrailError {
    #[error("Trail not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid trail record: {0}")]
    InvalidRecord(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, TrailError>;
