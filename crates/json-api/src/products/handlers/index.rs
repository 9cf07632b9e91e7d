//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use till_app::products::models::ProductFilter;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Matching products, ordered by category then name
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Lists the catalog, optionally filtered by a name search and a category.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    category: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter {
        search: search.into_inner(),
        category: category.into_inner(),
    };

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use till_app::products::{MockProductsService, ProductsServiceError, models::ProductUuid};

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .withf(|filter| *filter == ProductFilter::default())
            .return_once(|_| Ok(vec![]));

        repo.expect_get_product().never();

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await;

        let response: ProductsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(response.products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_products_in_service_order() -> TestResult {
        let uuid_b = ProductUuid::new();
        let uuid_a = ProductUuid::new();

        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .return_once(move |_| Ok(vec![make_product(uuid_a), make_product(uuid_b)]));

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert_eq!(response.products.len(), 2, "expected two products");
        assert_eq!(response.products[0].uuid, uuid_a.into_uuid());
        assert_eq!(response.products[1].uuid, uuid_b.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_search_and_category() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .withf(|filter| {
                *filter
                    == ProductFilter {
                        search: Some("kopi".to_string()),
                        category: Some("Minuman".to_string()),
                    }
            })
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/products?search=kopi&category=Minuman")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
