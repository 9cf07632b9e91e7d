//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        amounts::to_db_amount,
        products::{
            errors::ProductsServiceError,
            models::{NewProduct, Product, ProductFilter, ProductUpdate, ProductUuid},
            repository::{PgProductsRepository, ProductChanges, ProductRow},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let filter = ProductFilter {
            search: non_blank(filter.search),
            category: non_blank(filter.category),
        };

        let mut tx = self.db.begin_read_only().await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let row = ProductRow {
            name: required(&product.name, "name must not be empty")?,
            category: required(&product.category, "category must not be empty")?,
            price: to_db_amount(product.price)?,
            stock: to_db_amount(product.stock)?,
        };

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, ProductUuid::new(), row)
            .await?;

        tx.commit().await?;

        info!(product = %created.uuid, name = %created.name, "product created");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let changes = ProductChanges {
            name: update
                .name
                .as_deref()
                .map(|name| required(name, "name must not be empty"))
                .transpose()?,
            category: update
                .category
                .as_deref()
                .map(|category| required(category, "category must not be empty"))
                .transpose()?,
            price: update.price.map(to_db_amount).transpose()?,
            stock: update.stock.map(to_db_amount).transpose()?,
        };

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, changes)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        if self.repository.count_references(&mut tx, product).await? > 0 {
            return Err(ProductsServiceError::ReferencedEntity);
        }

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%product, "product deleted");

        Ok(())
    }

    async fn adjust_stock(
        &self,
        product: ProductUuid,
        delta: i64,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let adjusted = adjust_stock_in(&self.repository, &mut tx, product, delta).await?;

        tx.commit().await?;

        Ok(adjusted)
    }

    async fn list_categories(&self) -> Result<Vec<String>, ProductsServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn low_stock(&self, threshold: u64) -> Result<Vec<Product>, ProductsServiceError> {
        let threshold = to_db_amount(threshold).unwrap_or(i64::MAX);

        let mut tx = self.db.begin_read_only().await?;

        let products = self.repository.list_low_stock(&mut tx, threshold).await?;

        tx.commit().await?;

        Ok(products)
    }
}

/// Adjust stock inside an open unit of work.
///
/// Distinguishes a missing product from a decrement that would take stock
/// below zero and an increment past the largest storable stock.
pub(crate) async fn adjust_stock_in(
    repository: &PgProductsRepository,
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    product: ProductUuid,
    delta: i64,
) -> Result<Product, ProductsServiceError> {
    if let Some(adjusted) = repository.adjust_stock(tx, product, delta).await? {
        return Ok(adjusted);
    }

    if !repository.product_exists(tx, product).await? {
        return Err(ProductsServiceError::NotFound);
    }

    if delta > 0 {
        Err(ProductsServiceError::Validation("stock would exceed the maximum"))
    } else {
        Err(ProductsServiceError::InsufficientStock { product })
    }
}

fn required<'a>(value: &'a str, message: &'static str) -> Result<&'a str, ProductsServiceError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ProductsServiceError::Validation(message));
    }

    Ok(value)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Lists products matching the filter, ordered by category then name.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Updates the given fields of a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product that no order line references.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Applies `stock += delta`, refusing to go below zero.
    async fn adjust_stock(
        &self,
        product: ProductUuid,
        delta: i64,
    ) -> Result<Product, ProductsServiceError>;

    /// Distinct categories in use, sorted.
    async fn list_categories(&self) -> Result<Vec<String>, ProductsServiceError>;

    /// Products whose stock is at or below the threshold, lowest first.
    async fn low_stock(&self, threshold: u64) -> Result<Vec<Product>, ProductsServiceError>;
}
