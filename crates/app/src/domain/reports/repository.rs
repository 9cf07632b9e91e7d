//! Reports Repository

use jiff::Timestamp;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    amounts::try_get_amount,
    products::models::ProductUuid,
    reports::models::{
        CategorySales, DailySales, HourlySales, InventoryValue, PaymentMethodSales,
        ProductSales,
    },
};

const SALES_BY_PRODUCT_SQL: &str = include_str!("sql/sales_by_product.sql");
const SALES_BY_CATEGORY_SQL: &str = include_str!("sql/sales_by_category.sql");
const SALES_BY_PAYMENT_METHOD_SQL: &str = include_str!("sql/sales_by_payment_method.sql");
const DAILY_SALES_SQL: &str = include_str!("sql/daily_sales.sql");
const HOURLY_SALES_SQL: &str = include_str!("sql/hourly_sales.sql");
const INVENTORY_VALUATION_SQL: &str = include_str!("sql/inventory_valuation.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReportsRepository;

impl PgReportsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn sales_by_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        since: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<ProductSales>, sqlx::Error> {
        query_as::<Postgres, ProductSales>(SALES_BY_PRODUCT_SQL)
            .bind(SqlxTimestamp::from(since))
            .bind(SqlxTimestamp::from(until))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn sales_by_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        since: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<CategorySales>, sqlx::Error> {
        query_as::<Postgres, CategorySales>(SALES_BY_CATEGORY_SQL)
            .bind(SqlxTimestamp::from(since))
            .bind(SqlxTimestamp::from(until))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn sales_by_payment_method(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        since: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<PaymentMethodSales>, sqlx::Error> {
        query_as::<Postgres, PaymentMethodSales>(SALES_BY_PAYMENT_METHOD_SQL)
            .bind(SqlxTimestamp::from(since))
            .bind(SqlxTimestamp::from(until))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn daily_sales(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        since: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<DailySales>, sqlx::Error> {
        query_as::<Postgres, DailySales>(DAILY_SALES_SQL)
            .bind(SqlxTimestamp::from(since))
            .bind(SqlxTimestamp::from(until))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn hourly_sales(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        since: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<HourlySales>, sqlx::Error> {
        query_as::<Postgres, HourlySales>(HOURLY_SALES_SQL)
            .bind(SqlxTimestamp::from(since))
            .bind(SqlxTimestamp::from(until))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn inventory_valuation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<InventoryValue>, sqlx::Error> {
        query_as::<Postgres, InventoryValue>(INVENTORY_VALUATION_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSales {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            quantity: try_get_amount(row, "quantity")?,
            revenue: try_get_amount(row, "revenue")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CategorySales {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            category: row.try_get("category")?,
            quantity: try_get_amount(row, "quantity")?,
            revenue: try_get_amount(row, "revenue")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PaymentMethodSales {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let payment_method: String = row.try_get("payment_method")?;

        Ok(Self {
            payment_method: payment_method
                .parse()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "payment_method".to_string(),
                    source: Box::new(e),
                })?,
            orders: try_get_amount(row, "orders")?,
            revenue: try_get_amount(row, "revenue")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for DailySales {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            date: row.try_get::<SqlxDate, _>("day")?.to_jiff(),
            orders: try_get_amount(row, "orders")?,
            revenue: try_get_amount(row, "revenue")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for HourlySales {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let hour: i64 = row.try_get("hour")?;

        Ok(Self {
            hour: u8::try_from(hour).map_err(|e| sqlx::Error::ColumnDecode {
                index: "hour".to_string(),
                source: Box::new(e),
            })?,
            orders: try_get_amount(row, "orders")?,
            revenue: try_get_amount(row, "revenue")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for InventoryValue {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price = try_get_amount(row, "price")?;
        let stock = try_get_amount(row, "stock")?;

        Ok(Self {
            product: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            price,
            stock,
            value: u128::from(price) * u128::from(stock),
        })
    }
}
