//! Order Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use till_app::orders::models::{DEFAULT_ORDER_LIMIT, OrderSearch};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Matching orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// Without criteria, returns the most recent orders. `keyword` matches the
/// order id or customer name; `from` and `to` are inclusive `YYYY-MM-DD`
/// days in UTC.
#[endpoint(
    tags("orders"),
    summary = "Search Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    keyword: QueryParam<String, false>,
    from: QueryParam<String, false>,
    to: QueryParam<String, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let search = OrderSearch {
        keyword: keyword.into_inner().filter(|keyword| !keyword.trim().is_empty()),
        from: from.into_date("from")?,
        to: to.into_date("to")?,
        limit: limit.into_inner().unwrap_or(DEFAULT_ORDER_LIMIT),
    };

    if let (Some(from), Some(to)) = (search.from, search.to)
        && from > to
    {
        return Err(StatusError::bad_request().brief("\"from\" must not be after \"to\""));
    }

    let is_recent = search.keyword.is_none() && search.from.is_none() && search.to.is_none();

    let orders = if is_recent {
        state.app.orders.recent_orders(search.limit).await
    } else {
        state.app.orders.search_orders(search).await
    }
    .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}
