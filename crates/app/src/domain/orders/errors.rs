//! Orders service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::{ProductsServiceError, models::ProductUuid};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("invalid order: {0}")]
    Validation(&'static str),

    #[error("cart is empty")]
    EmptyCart,

    #[error("amount tendered {tendered} is less than total {total}")]
    InsufficientPayment { total: u64, tendered: u64 },

    #[error("insufficient stock for product {product}")]
    InsufficientStock { product: ProductUuid },

    #[error("order id already exists")]
    DuplicateId,

    #[error("order not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateId,
            Some(ErrorKind::ForeignKeyViolation) => {
                Self::Validation("order references an unknown product or operator")
            }
            Some(ErrorKind::CheckViolation) => Self::Validation("order violates a constraint"),
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<ProductsServiceError> for OrdersServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::InsufficientStock { product } => {
                Self::InsufficientStock { product }
            }
            ProductsServiceError::NotFound | ProductsServiceError::ReferencedEntity => {
                Self::Validation("order references an unknown product or operator")
            }
            ProductsServiceError::Validation(message) => Self::Validation(message),
            ProductsServiceError::Sql(error) => Self::Sql(error),
        }
    }
}

impl From<TryFromIntError> for OrdersServiceError {
    fn from(_error: TryFromIntError) -> Self {
        Self::Validation("amount is out of range")
    }
}

impl From<jiff::Error> for OrdersServiceError {
    fn from(_error: jiff::Error) -> Self {
        Self::Validation("date is out of range")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_failures_keep_the_product() {
        let product = ProductUuid::new();

        let error = OrdersServiceError::from(ProductsServiceError::InsufficientStock { product });

        assert!(
            matches!(error, OrdersServiceError::InsufficientStock { product: p } if p == product),
            "expected InsufficientStock, got {error:?}"
        );
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = OrdersServiceError::from(Error::RowNotFound);

        assert!(
            matches!(error, OrdersServiceError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }
}
