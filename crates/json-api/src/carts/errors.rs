//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use till_app::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        CartsServiceError::NotFound => {
            StatusError::not_found().brief("Product or cart line not found")
        }
        CartsServiceError::InsufficientStock { product } => {
            StatusError::conflict().brief(format!("Insufficient stock for product {product}"))
        }
        CartsServiceError::Catalog(source) => {
            error!("failed to consult catalog for cart: {source}");

            StatusError::internal_server_error()
        }
    }
}
