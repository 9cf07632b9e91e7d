//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use till_app::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::InsufficientStock { product } => {
            StatusError::conflict().brief(format!("Insufficient stock for product {product}"))
        }
        ProductsServiceError::ReferencedEntity => {
            StatusError::conflict().brief("Product is referenced by existing orders")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
