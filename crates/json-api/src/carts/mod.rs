//! Session Carts

pub(crate) mod errors;
mod handlers;
pub(crate) mod items;

pub(crate) use handlers::*;

use salvo::http::StatusError;
use uuid::Uuid;

use crate::{sessions::SessionCart, state::State};

/// Look up an open session cart.
pub(crate) async fn session_cart(state: &State, cart: Uuid) -> Result<SessionCart, StatusError> {
    state
        .carts
        .get(cart.into())
        .await
        .ok_or_else(|| StatusError::not_found().brief("Cart not found"))
}
