//! Clear Cart Items Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{get::CartResponse, session_cart},
    extensions::*,
    state::State,
};

/// Clear Cart Items Handler
///
/// Removes every line but keeps the cart open.
#[endpoint(
    tags("carts"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    )
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = cart.into_inner();

    let cart = session_cart(state, uuid).await?;
    let mut cart = cart.lock().await;

    cart.clear();

    Ok(Json(CartResponse::new(uuid, &cart)))
}
