//! Adjust Stock Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Adjust Stock Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdjustStockRequest {
    /// Signed change to apply; the result may not go below zero
    pub delta: i64,
}

/// Adjust Stock Handler
#[endpoint(
    tags("products"),
    summary = "Adjust Product Stock",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stock adjusted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Stock would go below zero"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<AdjustStockRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let operator = depot.operator_or_401()?;
    let product = product.into_inner();
    let delta = json.into_inner().delta;

    let adjusted = state
        .app
        .products
        .adjust_stock(product.into(), delta)
        .await
        .map_err(into_status_error)?;

    info!(
        product_uuid = %product,
        delta,
        stock = adjusted.stock,
        operator = %operator.username,
        "adjusted stock"
    );

    Ok(Json(adjusted.into()))
}
