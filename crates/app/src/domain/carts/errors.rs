//! Carts service errors.

use thiserror::Error;

use crate::domain::products::{ProductsServiceError, models::ProductUuid};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("invalid cart change: {0}")]
    Validation(&'static str),

    #[error("product or cart line not found")]
    NotFound,

    #[error("insufficient stock for product {product}")]
    InsufficientStock { product: ProductUuid },

    #[error("catalog lookup failed")]
    Catalog(#[source] ProductsServiceError),
}

impl From<ProductsServiceError> for CartsServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound => Self::NotFound,
            ProductsServiceError::InsufficientStock { product } => {
                Self::InsufficientStock { product }
            }
            ProductsServiceError::Validation(message) => Self::Validation(message),
            ProductsServiceError::ReferencedEntity | ProductsServiceError::Sql(_) => {
                Self::Catalog(error)
            }
        }
    }
}
