//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    carts::{
        errors::CartsServiceError,
        models::{Cart, CartLine},
    },
    products::{ProductsService, models::ProductUuid},
};

const LINE_TOO_LARGE: &str = "line subtotal is out of range";

/// Cart operations that consult the product catalog.
#[derive(Clone)]
pub struct CatalogCartsService {
    products: Arc<dyn ProductsService>,
}

impl CatalogCartsService {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CartsService for CatalogCartsService {
    async fn add_item(
        &self,
        cart: &mut Cart,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartLine, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::Validation("quantity must be positive"));
        }

        let found = self.products.get_product(product).await?;

        if u64::from(quantity) > found.stock {
            return Err(CartsServiceError::InsufficientStock { product });
        }

        if let Some(line) = cart.line_for_mut(product) {
            let merged = line
                .quantity
                .checked_add(quantity)
                .ok_or(CartsServiceError::Validation("quantity is out of range"))?;

            line.set_quantity(merged)
                .ok_or(CartsServiceError::Validation(LINE_TOO_LARGE))?;

            return Ok(line.clone());
        }

        let line = CartLine::new(product, found.name, found.price, quantity)
            .ok_or(CartsServiceError::Validation(LINE_TOO_LARGE))?;

        cart.push(line.clone());

        Ok(line)
    }

    async fn update_item(
        &self,
        cart: &mut Cart,
        index: usize,
        quantity: u32,
    ) -> Result<CartLine, CartsServiceError> {
        let product = cart
            .lines()
            .get(index)
            .map(|line| line.product)
            .ok_or(CartsServiceError::NotFound)?;

        if quantity == 0 {
            return Err(CartsServiceError::Validation("quantity must be positive"));
        }

        let found = self.products.get_product(product).await?;

        if u64::from(quantity) > found.stock {
            return Err(CartsServiceError::InsufficientStock { product });
        }

        let line = cart.line_mut(index).ok_or(CartsServiceError::NotFound)?;

        line.set_quantity(quantity)
            .ok_or(CartsServiceError::Validation(LINE_TOO_LARGE))?;

        Ok(line.clone())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Adds `quantity` of a product, merging into its existing line.
    async fn add_item(
        &self,
        cart: &mut Cart,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartLine, CartsServiceError>;

    /// Sets the quantity of the line at `index`.
    async fn update_item(
        &self,
        cart: &mut Cart,
        index: usize,
        quantity: u32,
    ) -> Result<CartLine, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::domain::products::{
        MockProductsService, ProductsServiceError, models::Product,
    };

    use super::*;

    fn product(name: &str, price: u64, stock: u64) -> Product {
        Product {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            category: "Minuman".to_string(),
            price,
            stock,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn service_with(products: Vec<Product>) -> CatalogCartsService {
        let mut mock = MockProductsService::new();

        for found in products {
            mock.expect_get_product()
                .with(eq(found.uuid))
                .returning(move |_| Ok(found.clone()));
        }

        CatalogCartsService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn add_item_appends_line_with_snapshot() -> TestResult {
        let kopi = product("Kopi", 10_000, 5);
        let service = service_with(vec![kopi.clone()]);
        let mut cart = Cart::new();

        let line = service.add_item(&mut cart, kopi.uuid, 2).await?;

        assert_eq!(line.name, "Kopi");
        assert_eq!(line.unit_price, 10_000);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.subtotal, 20_000);
        assert_eq!(cart.lines(), [line]);

        Ok(())
    }

    #[tokio::test]
    async fn repeated_adds_merge_into_one_line() -> TestResult {
        let kopi = product("Kopi", 10_000, 5);
        let teh = product("Teh", 4_000, 10);
        let service = service_with(vec![kopi.clone(), teh.clone()]);
        let mut cart = Cart::new();

        for quantity in [1, 3, 2] {
            service.add_item(&mut cart, kopi.uuid, quantity).await?;
        }

        service.add_item(&mut cart, teh.uuid, 4).await?;
        service.add_item(&mut cart, kopi.uuid, 4).await?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].product, kopi.uuid);
        assert_eq!(cart.lines()[0].quantity, 10);
        assert_eq!(cart.lines()[0].subtotal, 100_000);
        assert_eq!(cart.lines()[1].quantity, 4);
        assert_eq!(cart.total(), 116_000);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_checks_only_the_added_quantity() -> TestResult {
        let kopi = product("Kopi", 10_000, 3);
        let service = service_with(vec![kopi.clone()]);
        let mut cart = Cart::new();

        service.add_item(&mut cart, kopi.uuid, 3).await?;
        service.add_item(&mut cart, kopi.uuid, 3).await?;

        assert_eq!(cart.lines()[0].quantity, 6);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_more_than_stock_returns_insufficient_stock() {
        let kopi = product("Kopi", 10_000, 2);
        let service = service_with(vec![kopi.clone()]);
        let mut cart = Cart::new();

        let result = service.add_item(&mut cart, kopi.uuid, 3).await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InsufficientStock { product }) if product == kopi.uuid
            ),
            "expected InsufficientStock, got {result:?}"
        );
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn add_item_zero_quantity_returns_validation_error() {
        let service = CatalogCartsService::new(Arc::new(MockProductsService::new()));
        let mut cart = Cart::new();

        let result = service.add_item(&mut cart, ProductUuid::new(), 0).await;

        assert!(
            matches!(result, Err(CartsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_item_unknown_product_returns_not_found() {
        let mut mock = MockProductsService::new();

        mock.expect_get_product()
            .returning(|_| Err(ProductsServiceError::NotFound));

        let service = CatalogCartsService::new(Arc::new(mock));
        let mut cart = Cart::new();

        let result = service.add_item(&mut cart, ProductUuid::new(), 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_item_sets_quantity() -> TestResult {
        let kopi = product("Kopi", 10_000, 5);
        let service = service_with(vec![kopi.clone()]);
        let mut cart = Cart::new();

        service.add_item(&mut cart, kopi.uuid, 1).await?;

        let line = service.update_item(&mut cart, 0, 4).await?;

        assert_eq!(line.quantity, 4);
        assert_eq!(cart.total(), 40_000);

        Ok(())
    }

    #[tokio::test]
    async fn update_item_beyond_stock_keeps_line_unchanged() -> TestResult {
        let kopi = product("Kopi", 10_000, 5);
        let service = service_with(vec![kopi.clone()]);
        let mut cart = Cart::new();

        service.add_item(&mut cart, kopi.uuid, 2).await?;

        let result = service.update_item(&mut cart, 0, 6).await;

        assert!(
            matches!(result, Err(CartsServiceError::InsufficientStock { .. })),
            "expected InsufficientStock, got {result:?}"
        );
        assert_eq!(cart.lines()[0].quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn update_item_bad_index_returns_not_found() {
        let service = CatalogCartsService::new(Arc::new(MockProductsService::new()));
        let mut cart = Cart::new();

        let result = service.update_item(&mut cart, 0, 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_item_zero_quantity_returns_validation_error() -> TestResult {
        let kopi = product("Kopi", 10_000, 5);
        let service = service_with(vec![kopi.clone()]);
        let mut cart = Cart::new();

        service.add_item(&mut cart, kopi.uuid, 1).await?;

        let result = service.update_item(&mut cart, 0, 0).await;

        assert!(
            matches!(result, Err(CartsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }
}
