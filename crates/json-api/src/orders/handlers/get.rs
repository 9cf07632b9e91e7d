//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use till_app::orders::models::{Order, OrderId, OrderLine, Receipt};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// Order identifier, e.g. `TRX-20260315-9f3a1c07`
    pub id: String,

    pub customer_name: Option<String>,

    pub total: u64,

    /// One of `cash`, `debit`, `credit` or `qris`
    pub payment_method: String,

    pub amount_tendered: u64,

    pub change: u64,

    /// The operator who committed the order
    pub cashier_uuid: Uuid,

    /// The date and time the order was committed
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.into_string(),
            customer_name: order.customer_name,
            total: order.total,
            payment_method: order.payment_method.to_string(),
            amount_tendered: order.amount_tendered,
            change: order.change,
            cashier_uuid: order.cashier.into(),
            created_at: order.created_at.to_string(),
        }
    }
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub subtotal: u64,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            product_uuid: line.product.into(),
            product_name: line.product_name,
            quantity: line.quantity,
            unit_price: line.unit_price,
            subtotal: line.subtotal,
        }
    }
}

/// Receipt Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReceiptResponse {
    pub order: OrderResponse,

    /// Lines in the order they were added to the cart
    pub lines: Vec<OrderLineResponse>,
}

impl From<Receipt> for ReceiptResponse {
    fn from(receipt: Receipt) -> Self {
        Self {
            order: receipt.order.into(),
            lines: receipt.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Order Handler
///
/// Returns the receipt of a committed order.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ReceiptResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let receipt = state
        .app
        .orders
        .get_order(&OrderId::new(order.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(receipt.into()))
}
