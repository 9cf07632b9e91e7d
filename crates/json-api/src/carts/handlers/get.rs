//! Get Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use till_app::carts::models::{Cart, CartLine};

use crate::{carts::session_cart, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The session cart identifier
    pub uuid: Uuid,

    /// Lines in the order their products were first added
    pub lines: Vec<CartLineResponse>,

    /// Sum of all line subtotals
    pub total: u64,
}

impl CartResponse {
    pub(crate) fn new(uuid: Uuid, cart: &Cart) -> Self {
        Self {
            uuid,
            lines: cart
                .lines()
                .iter()
                .enumerate()
                .map(|(index, line)| CartLineResponse::new(index, line))
                .collect(),
            total: cart.total(),
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// Position of the line, used to update or remove it
    pub index: usize,

    pub product_uuid: Uuid,

    /// Product name when the line was created
    pub name: String,

    /// Product price when the line was created
    pub unit_price: u64,

    pub quantity: u32,

    pub subtotal: u64,
}

impl CartLineResponse {
    fn new(index: usize, line: &CartLine) -> Self {
        Self {
            index,
            product_uuid: line.product.into(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            subtotal: line.subtotal,
        }
    }
}

/// Get Cart Handler
///
/// Shows the cart lines and the running total.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = cart.into_inner();

    let cart = session_cart(state, uuid).await?;
    let cart = cart.lock().await;

    Ok(Json(CartResponse::new(uuid, &cart)))
}
