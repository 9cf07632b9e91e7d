//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, get::CartResponse, session_cart},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    pub quantity: u32,
}

/// Update Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Update Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or line not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    index: PathParam<usize>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = cart.into_inner();

    let cart = session_cart(state, uuid).await?;
    let mut cart = cart.lock().await;

    state
        .app
        .carts
        .update_item(&mut cart, index.into_inner(), json.into_inner().quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::new(uuid, &cart)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use till_app::products::{MockProductsService, models::ProductUuid};

    use crate::test_helpers::{Mocks, authenticated_service, cart_with, make_product};

    use super::*;

    async fn state_with_kopi_line() -> (Arc<State>, Uuid) {
        let kopi = make_product(ProductUuid::new());
        let found = kopi.clone();

        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .returning(move |_| Ok(found.clone()));

        let state = Mocks {
            products,
            ..Mocks::default()
        }
        .into_state();

        let uuid = state.carts.insert(cart_with(&[(kopi, 1)]).await).await;

        (state, uuid.into_uuid())
    }

    fn make_service(state: Arc<State>) -> Service {
        authenticated_service(
            state,
            Router::with_path("carts/{cart}/items/{index}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_item_sets_quantity() -> TestResult {
        let (state, uuid) = state_with_kopi_line().await;

        let mut res = TestClient::put(format!("http://example.com/carts/{uuid}/items/0"))
            .json(&json!({ "quantity": 3 }))
            .send(&make_service(state))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.lines[0].quantity, 3);
        assert_eq!(body.lines[0].subtotal, 30_000);
        assert_eq!(body.total, 30_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_beyond_stock_returns_409() -> TestResult {
        let (state, uuid) = state_with_kopi_line().await;

        let res = TestClient::put(format!("http://example.com/carts/{uuid}/items/0"))
            .json(&json!({ "quantity": 6 }))
            .send(&make_service(state))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_line_returns_404() -> TestResult {
        let (state, uuid) = state_with_kopi_line().await;

        let res = TestClient::put(format!("http://example.com/carts/{uuid}/items/4"))
            .json(&json!({ "quantity": 1 }))
            .send(&make_service(state))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
