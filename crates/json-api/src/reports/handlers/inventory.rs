//! Inventory Valuation Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use till_app::reports::models::InventoryValue;

use crate::{extensions::*, reports::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InventoryRow {
    pub product_uuid: Uuid,
    pub name: String,
    pub category: String,
    pub price: u64,
    pub stock: u64,

    /// `price * stock`
    pub value: u128,
}

impl From<InventoryValue> for InventoryRow {
    fn from(row: InventoryValue) -> Self {
        Self {
            product_uuid: row.product.into(),
            name: row.name,
            category: row.category,
            price: row.price,
            stock: row.stock,
            value: row.value,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InventoryResponse {
    pub products: Vec<InventoryRow>,

    /// Value of all stock on hand
    pub total_value: u128,
}

/// Inventory Valuation Handler
#[endpoint(
    tags("reports"),
    summary = "Inventory Valuation",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Report produced"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<InventoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let rows = state
        .app
        .reports
        .inventory_valuation()
        .await
        .map_err(into_status_error)?;

    let total_value = rows
        .iter()
        .fold(0_u128, |total, row| total.saturating_add(row.value));

    Ok(Json(InventoryResponse {
        products: rows.into_iter().map(Into::into).collect(),
        total_value,
    }))
}
