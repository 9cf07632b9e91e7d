//! Test Helpers

use std::sync::Arc;

use crate::{
    domain::{
        carts::{CartsService, CartsServiceError, CatalogCartsService, models::Cart},
        orders::models::{Checkout, PaymentMethod},
        products::{
            PgProductsService, ProductsService, ProductsServiceError,
            models::{NewProduct, Product, ProductUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    category: &str,
    price: u64,
    stock: u64,
) -> Result<Product, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            name: name.to_string(),
            category: category.to_string(),
            price,
            stock,
        })
        .await
}

/// Build a cart through the catalog, as a session would.
pub(crate) async fn cart_with(
    ctx: &TestContext,
    items: &[(ProductUuid, u32)],
) -> Result<Cart, CartsServiceError> {
    let carts = CatalogCartsService::new(Arc::new(PgProductsService::new(ctx.database())));
    let mut cart = Cart::new();

    for (product, quantity) in items {
        carts.add_item(&mut cart, *product, *quantity).await?;
    }

    Ok(cart)
}

pub(crate) fn cash_checkout(ctx: &TestContext, amount_tendered: u64) -> Checkout {
    Checkout {
        customer_name: None,
        payment_method: PaymentMethod::Cash,
        amount_tendered,
        cashier: ctx.cashier.uuid,
    }
}
