//! Products service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::models::ProductUuid;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("invalid product: {0}")]
    Validation(&'static str),

    #[error("product not found")]
    NotFound,

    #[error("insufficient stock for product {product}")]
    InsufficientStock { product: ProductUuid },

    #[error("product is referenced by existing orders")]
    ReferencedEntity,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::ReferencedEntity,
            Some(ErrorKind::CheckViolation) => {
                Self::Validation("value violates a catalog constraint")
            }
            Some(ErrorKind::NotNullViolation) => Self::Validation("missing required field"),
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<TryFromIntError> for ProductsServiceError {
    fn from(_error: TryFromIntError) -> Self {
        Self::Validation("amount is out of range")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = ProductsServiceError::from(Error::RowNotFound);

        assert!(
            matches!(error, ProductsServiceError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }

    #[test]
    fn out_of_range_amount_maps_to_validation() {
        let error = ProductsServiceError::from(i64::try_from(u64::MAX).unwrap_err());

        assert!(
            matches!(error, ProductsServiceError::Validation(_)),
            "expected Validation, got {error:?}"
        );
    }
}
