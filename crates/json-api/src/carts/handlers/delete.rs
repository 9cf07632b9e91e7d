//! Delete Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

/// Delete Cart Handler
///
/// Discards the session cart and its lines.
#[endpoint(
    tags("carts"),
    summary = "Discard Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart discarded"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    if state.carts.close(cart.into_inner().into()).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusError::not_found().brief("Cart not found"))
    }
}
