//! Low Stock Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, index::ProductsResponse},
    state::State,
};

/// Low Stock Handler
///
/// Products whose stock is at or below `threshold`, lowest first. The
/// threshold defaults to the configured `LOW_STOCK_THRESHOLD`.
#[endpoint(
    tags("reports"),
    summary = "Low Stock Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Report produced"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    threshold: QueryParam<u64, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let threshold = threshold.into_inner().unwrap_or(state.low_stock_threshold);

    let products = state
        .app
        .products
        .low_stock(threshold)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
