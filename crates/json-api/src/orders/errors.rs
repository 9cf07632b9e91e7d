//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use till_app::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::InsufficientPayment { total, tendered } => {
            StatusError::payment_required().brief(format!(
                "Amount tendered {tendered} is less than total {total}"
            ))
        }
        OrdersServiceError::InsufficientStock { product } => {
            StatusError::conflict().brief(format!("Insufficient stock for product {product}"))
        }
        OrdersServiceError::DuplicateId => {
            error!("order id collided twice in a row");

            StatusError::conflict().brief("Order id already exists, retry the checkout")
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
