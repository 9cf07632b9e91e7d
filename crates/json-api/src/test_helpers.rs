//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use till_app::{
    carts::{CartsService, CatalogCartsService, models::Cart},
    context::AppContext,
    operators::{
        MockOperatorsService,
        models::{Operator, OperatorRole, OperatorUuid},
    },
    orders::MockOrdersService,
    products::{
        MockProductsService, ProductsService,
        models::{Product, ProductUuid},
    },
    reports::MockReportsService,
};

use crate::{extensions::*, sessions::CartSessions, state::State};

pub(crate) const TEST_OPERATOR_UUID: OperatorUuid = OperatorUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_LOW_STOCK_THRESHOLD: u64 = 5;

pub(crate) fn test_operator() -> Operator {
    Operator {
        uuid: TEST_OPERATOR_UUID,
        username: "kasir".to_string(),
        role: OperatorRole::Cashier,
        created_at: Timestamp::UNIX_EPOCH,
        revoked_at: None,
    }
}

#[salvo::handler]
pub(crate) async fn inject_operator(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_operator(test_operator());
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn make_product(uuid: ProductUuid) -> Product {
    Product {
        uuid,
        name: "Kopi Susu".to_string(),
        category: "Minuman".to_string(),
        price: 10_000,
        stock: 5,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Mocked services, each refusing every call unless a test replaces it.
pub(crate) struct Mocks {
    pub(crate) products: MockProductsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) reports: MockReportsService,
    pub(crate) operators: MockOperatorsService,
}

impl Default for Mocks {
    fn default() -> Self {
        Self {
            products: strict_products_mock(),
            orders: strict_orders_mock(),
            reports: strict_reports_mock(),
            operators: strict_operators_mock(),
        }
    }
}

impl Mocks {
    /// Build state whose carts consult the mocked catalog.
    pub(crate) fn into_state(self) -> Arc<State> {
        let products: Arc<dyn ProductsService> = Arc::new(self.products);
        let carts: Arc<dyn CartsService> =
            Arc::new(CatalogCartsService::new(Arc::clone(&products)));

        let app = AppContext {
            products,
            carts,
            orders: Arc::new(self.orders),
            reports: Arc::new(self.reports),
            operators: Arc::new(self.operators),
        };

        State::from_app_context(app, CartSessions::default(), TEST_LOW_STOCK_THRESHOLD)
    }
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();
    products.expect_adjust_stock().never();
    products.expect_list_categories().never();
    products.expect_low_stock().never();

    products
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_commit().never();
    orders.expect_get_order().never();
    orders.expect_recent_orders().never();
    orders.expect_search_orders().never();

    orders
}

fn strict_reports_mock() -> MockReportsService {
    let mut reports = MockReportsService::new();

    reports.expect_sales_by_product().never();
    reports.expect_sales_by_category().never();
    reports.expect_sales_by_payment_method().never();
    reports.expect_daily_sales().never();
    reports.expect_hourly_sales().never();
    reports.expect_inventory_valuation().never();

    reports
}

fn strict_operators_mock() -> MockOperatorsService {
    let mut operators = MockOperatorsService::new();

    operators.expect_create_operator().never();
    operators.expect_authenticate().never();
    operators.expect_get_operator().never();
    operators.expect_list_operators().never();
    operators.expect_revoke_operator().never();
    operators.expect_rotate_token().never();

    operators
}

pub(crate) fn state_with_operators(operators: MockOperatorsService) -> Arc<State> {
    Mocks {
        operators,
        ..Mocks::default()
    }
    .into_state()
}

/// Serve `route` as an authenticated operator.
pub(crate) fn authenticated_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_operator)
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    let state = Mocks {
        products,
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    let state = Mocks {
        orders,
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}

pub(crate) fn reports_service(reports: MockReportsService, route: Router) -> Service {
    let state = Mocks {
        reports,
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}

/// Fill a cart through the real cart rules against a catalog of `products`.
pub(crate) async fn cart_with(products: &[(Product, u32)]) -> Cart {
    let mut catalog = MockProductsService::new();

    for (product, _) in products {
        let found = product.clone();
        let uuid = found.uuid;

        catalog
            .expect_get_product()
            .withf(move |requested| *requested == uuid)
            .returning(move |_| Ok(found.clone()));
    }

    let carts = CatalogCartsService::new(Arc::new(catalog));
    let mut cart = Cart::new();

    for (product, quantity) in products {
        if let Err(error) = carts.add_item(&mut cart, product.uuid, *quantity).await {
            panic!("failed to fill test cart: {error}");
        }
    }

    cart
}
