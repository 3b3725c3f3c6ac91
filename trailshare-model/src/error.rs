use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    InvalidKey(String),
    InvalidLikeness(i16),
    InvalidTrailKind(i16),
    InvalidVerdict(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidKey(msg) => write!(f, "invalid trail key: {msg}"),
            ModelError::InvalidLikeness(value) => {
                write!(f, "invalid likeness value: {value}")
            }
            ModelError::InvalidTrailKind(value) => {
                write!(f, "invalid trail kind value: {value}")
            }
            ModelError::InvalidVerdict(msg) => write!(f, "invalid verdict: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
