//! Errors raised at the crate boundary.
//!
//! Translation itself never fails; these cover parsing request bodies and
//! loading configuration.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Malformed grid request: {0}")]
    Request(#[from] serde_json::Error),

    #[error("Invalid field: {0}")]
    Field(#[from] TypeConstraintError),

    #[cfg(feature = "cli")]
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[cfg(feature = "cli")]
    #[error("Validation errors: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

pub type GridResult<T> = Result<T, GridError>;
