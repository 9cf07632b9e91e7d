//! Checkout Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use till_app::orders::models::{Checkout, PaymentMethod};

use crate::{
    carts::session_cart,
    extensions::*,
    observability::{CheckoutOutcome, record_checkout},
    orders::{errors::into_status_error, get::ReceiptResponse},
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    #[serde(default)]
    pub customer_name: Option<String>,

    /// One of `cash`, `debit`, `credit` or `qris`
    pub payment_method: String,

    pub amount_tendered: u64,
}

/// Checkout Handler
///
/// Commits the cart as an order stamped with the authenticated operator. The
/// cart is emptied on success and left untouched on failure.
#[endpoint(
    tags("carts"),
    summary = "Checkout Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order committed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or invalid payment details"),
        (status_code = StatusCode::PAYMENT_REQUIRED, description = "Amount tendered is below the total"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.checkout",
    skip(cart, json, depot, res),
    fields(cart_uuid = tracing::field::Empty, operator = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReceiptResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let operator = depot.operator_or_401()?;
    let request = json.into_inner();
    let uuid = cart.into_inner();

    let span = tracing::Span::current();

    span.record("cart_uuid", tracing::field::display(uuid));
    span.record("operator", tracing::field::display(&operator.username));

    let payment_method = request
        .payment_method
        .parse::<PaymentMethod>()
        .or_400("Unknown payment method")?;

    let checkout = Checkout {
        customer_name: request.customer_name,
        payment_method,
        amount_tendered: request.amount_tendered,
        cashier: operator.uuid,
    };

    let cart = session_cart(state, uuid).await?;
    let mut cart = cart.lock().await;

    let receipt = match state.app.orders.commit(&mut cart, checkout).await {
        Ok(receipt) => {
            record_checkout(CheckoutOutcome::Committed);

            receipt
        }
        Err(error) => {
            record_checkout(CheckoutOutcome::from(&error));

            return Err(into_status_error(error));
        }
    };

    res.add_header(LOCATION, format!("/orders/{}", receipt.order.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(receipt.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use till_app::{
        orders::{MockOrdersService, OrdersServiceError},
        products::models::ProductUuid,
    };

    use crate::{
        orders::handlers::tests::make_receipt,
        test_helpers::{Mocks, TEST_OPERATOR_UUID, authenticated_service, cart_with, make_product},
    };

    use super::*;

    fn make_service(state: Arc<State>) -> Service {
        authenticated_service(
            state,
            Router::with_path("carts/{cart}/checkout").post(handler),
        )
    }

    #[tokio::test]
    async fn test_checkout_commits_and_clears_cart() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_commit()
            .once()
            .withf(|cart, checkout| {
                cart.len() == 1
                    && *checkout
                        == Checkout {
                            customer_name: Some("Budi".to_string()),
                            payment_method: PaymentMethod::Cash,
                            amount_tendered: 50_000,
                            cashier: TEST_OPERATOR_UUID,
                        }
            })
            .return_once(|cart, _| {
                cart.clear();

                Ok(make_receipt("TRX-20260315-9f3a1c07"))
            });

        let state = Mocks {
            orders,
            ..Mocks::default()
        }
        .into_state();

        let cart = cart_with(&[(make_product(ProductUuid::new()), 2)]).await;
        let uuid = state.carts.insert(cart).await;

        let mut res = TestClient::post(format!("http://example.com/carts/{uuid}/checkout"))
            .json(&json!({
                "customer_name": "Budi",
                "payment_method": "cash",
                "amount_tendered": 50_000
            }))
            .send(&make_service(Arc::clone(&state)))
            .await;

        let body: ReceiptResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/orders/TRX-20260315-9f3a1c07"));
        assert_eq!(body.order.cashier_uuid, TEST_OPERATOR_UUID.into_uuid());

        let session = state.carts.get(uuid).await.ok_or("cart session closed")?;

        assert!(session.lock().await.is_empty(), "expected cart to be cleared");

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_underpayment_returns_402_and_keeps_cart() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_commit().once().return_once(|_, _| {
            Err(OrdersServiceError::InsufficientPayment {
                total: 20_000,
                tendered: 10_000,
            })
        });

        let state = Mocks {
            orders,
            ..Mocks::default()
        }
        .into_state();

        let cart = cart_with(&[(make_product(ProductUuid::new()), 2)]).await;
        let uuid = state.carts.insert(cart).await;

        let res = TestClient::post(format!("http://example.com/carts/{uuid}/checkout"))
            .json(&json!({ "payment_method": "cash", "amount_tendered": 10_000 }))
            .send(&make_service(Arc::clone(&state)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::PAYMENT_REQUIRED));

        let session = state.carts.get(uuid).await.ok_or("cart session closed")?;

        assert_eq!(session.lock().await.len(), 1, "expected cart to be kept");

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_commit()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::EmptyCart));

        let state = Mocks {
            orders,
            ..Mocks::default()
        }
        .into_state();

        let uuid = state.carts.open().await;

        let res = TestClient::post(format!("http://example.com/carts/{uuid}/checkout"))
            .json(&json!({ "payment_method": "qris", "amount_tendered": 0 }))
            .send(&make_service(state))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_insufficient_stock_returns_409() -> TestResult {
        let product = ProductUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_commit()
            .once()
            .return_once(move |_, _| Err(OrdersServiceError::InsufficientStock { product }));

        let state = Mocks {
            orders,
            ..Mocks::default()
        }
        .into_state();

        let cart = cart_with(&[(make_product(product), 1)]).await;
        let uuid = state.carts.insert(cart).await;

        let res = TestClient::post(format!("http://example.com/carts/{uuid}/checkout"))
            .json(&json!({ "payment_method": "debit", "amount_tendered": 10_000 }))
            .send(&make_service(state))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_unknown_payment_method_returns_400() -> TestResult {
        let state = Mocks::default().into_state();
        let uuid = state.carts.open().await;

        let res = TestClient::post(format!("http://example.com/carts/{uuid}/checkout"))
            .json(&json!({ "payment_method": "voucher", "amount_tendered": 10_000 }))
            .send(&make_service(state))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_unknown_cart_returns_404() -> TestResult {
        let res = TestClient::post(format!(
            "http://example.com/carts/{}/checkout",
            Uuid::now_v7()
        ))
        .json(&json!({ "payment_method": "cash", "amount_tendered": 10_000 }))
        .send(&make_service(Mocks::default().into_state()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
