//! Create Cart Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use till_app::carts::models::Cart;

use crate::{carts::get::CartResponse, extensions::*, state::State};

/// Create Cart Handler
///
/// Opens an empty session cart.
#[endpoint(
    tags("carts"),
    summary = "Open Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Cart opened"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let uuid = state.carts.open().await;

    res.add_header(LOCATION, format!("/carts/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CartResponse::new(uuid.into(), &Cart::new())))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, authenticated_service};

    use super::*;

    #[tokio::test]
    async fn test_create_cart_opens_empty_session() -> TestResult {
        let state = Mocks::default().into_state();
        let service =
            authenticated_service(Arc::clone(&state), Router::with_path("carts").post(handler));

        let mut res = TestClient::post("http://example.com/carts")
            .send(&service)
            .await;

        let body: CartResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/carts/{}", body.uuid).as_str()));
        assert!(body.lines.is_empty());
        assert_eq!(body.total, 0);
        assert!(
            state.carts.get(body.uuid.into()).await.is_some(),
            "expected cart session to be open"
        );

        Ok(())
    }
}
