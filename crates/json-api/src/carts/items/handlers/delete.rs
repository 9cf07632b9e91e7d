//! Delete Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{get::CartResponse, session_cart},
    extensions::*,
    state::State,
};

/// Delete Cart Item Handler
///
/// Lines after the removed one move up by one position.
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or line not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    )
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    index: PathParam<usize>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = cart.into_inner();

    let cart = session_cart(state, uuid).await?;
    let mut cart = cart.lock().await;

    cart.remove_item(index.into_inner())
        .ok_or_else(|| StatusError::not_found().brief("Cart line not found"))?;

    Ok(Json(CartResponse::new(uuid, &cart)))
}
