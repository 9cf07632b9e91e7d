//! Operators service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperatorsServiceError {
    #[error("invalid operator: {0}")]
    Validation(&'static str),

    #[error("operator already exists")]
    AlreadyExists,

    #[error("operator not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OperatorsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation) => Self::Validation("value violates a constraint"),
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
