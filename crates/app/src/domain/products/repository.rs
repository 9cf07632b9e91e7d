//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    amounts::try_get_amount,
    products::models::{Product, ProductFilter, ProductUuid},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const COUNT_PRODUCT_REFERENCES_SQL: &str = include_str!("sql/count_product_references.sql");
const ADJUST_STOCK_SQL: &str = include_str!("sql/adjust_stock.sql");
const PRODUCT_EXISTS_SQL: &str = include_str!("sql/product_exists.sql");
const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const LIST_LOW_STOCK_SQL: &str = include_str!("sql/list_low_stock.sql");

/// Validated column values for an insert.
#[derive(Debug)]
pub(crate) struct ProductRow<'a> {
    pub(crate) name: &'a str,
    pub(crate) category: &'a str,
    pub(crate) price: i64,
    pub(crate) stock: i64,
}

/// Validated column values for a partial update.
#[derive(Debug, Default)]
pub(crate) struct ProductChanges<'a> {
    pub(crate) name: Option<&'a str>,
    pub(crate) category: Option<&'a str>,
    pub(crate) price: Option<i64>,
    pub(crate) stock: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let search = filter.search.as_deref().map(escape_like);

        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .bind(search)
            .bind(filter.category.as_deref())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        row: ProductRow<'_>,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(row.name)
            .bind(row.category)
            .bind(row.price)
            .bind(row.stock)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        changes: ProductChanges<'_>,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(changes.name)
            .bind(changes.category)
            .bind(changes.price)
            .bind(changes.stock)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_references(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_PRODUCT_REFERENCES_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Apply `stock += delta` as one conditional statement.
    ///
    /// Returns `None` when the product is missing or the result would be
    /// negative; the row lock taken by the `UPDATE` serialises concurrent
    /// adjustments of the same product.
    pub(crate) async fn adjust_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        delta: i64,
    ) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(ADJUST_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(delta)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn product_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(PRODUCT_EXISTS_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<String>, sqlx::Error> {
        query_scalar(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_low_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        threshold: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_LOW_STOCK_SQL)
            .bind(threshold)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_amount(row, "stock")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

/// Escape `LIKE` wildcards so a search term matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(c);
    }

    escaped
}
