//! Reports service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportsServiceError {
    #[error("invalid report range: {0}")]
    Validation(&'static str),

    #[error("storage error")]
    Sql(#[from] Error),
}

impl From<jiff::Error> for ReportsServiceError {
    fn from(_error: jiff::Error) -> Self {
        Self::Validation("date is out of range")
    }
}
