//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    amounts::{try_get_amount, try_get_quantity},
    operators::models::OperatorUuid,
    orders::models::{Order, OrderId, OrderLine},
    products::{models::ProductUuid, repository::escape_like},
};

const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const INSERT_ORDER_LINE_SQL: &str = include_str!("sql/insert_order_line.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("sql/get_order_lines.sql");
const SEARCH_ORDERS_SQL: &str = include_str!("sql/search_orders.sql");

/// Header column values for an insert.
#[derive(Debug)]
pub(crate) struct OrderRow<'a> {
    pub(crate) id: &'a OrderId,
    pub(crate) customer_name: Option<&'a str>,
    pub(crate) total: i64,
    pub(crate) payment_method: &'static str,
    pub(crate) amount_tendered: i64,
    pub(crate) change: i64,
    pub(crate) cashier: OperatorUuid,
}

/// Line column values for an insert.
#[derive(Debug)]
pub(crate) struct OrderLineRow {
    pub(crate) product: ProductUuid,
    pub(crate) quantity: i64,
    pub(crate) unit_price: i64,
    pub(crate) subtotal: i64,
}

/// Search bounds, with `until` exclusive.
#[derive(Debug, Default)]
pub(crate) struct OrderQuery<'a> {
    pub(crate) keyword: Option<&'a str>,
    pub(crate) since: Option<Timestamp>,
    pub(crate) until: Option<Timestamp>,
    pub(crate) limit: i64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        row: OrderRow<'_>,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(INSERT_ORDER_SQL)
            .bind(row.id.as_str())
            .bind(row.customer_name)
            .bind(row.total)
            .bind(row.payment_method)
            .bind(row.amount_tendered)
            .bind(row.change)
            .bind(row.cashier.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn insert_order_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderId,
        row: OrderLineRow,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(INSERT_ORDER_LINE_SQL)
            .bind(order.as_str())
            .bind(row.product.into_uuid())
            .bind(row.quantity)
            .bind(row.unit_price)
            .bind(row.subtotal)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderId,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderId,
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        query_as::<Postgres, OrderLine>(GET_ORDER_LINES_SQL)
            .bind(order.as_str())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn search_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        query: OrderQuery<'_>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(SEARCH_ORDERS_SQL)
            .bind(query.keyword.map(escape_like))
            .bind(query.since.map(SqlxTimestamp::from))
            .bind(query.until.map(SqlxTimestamp::from))
            .bind(query.limit)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let payment_method: String = row.try_get("payment_method")?;

        Ok(Self {
            id: OrderId::new(row.try_get::<String, _>("id")?),
            customer_name: row.try_get("customer_name")?,
            total: try_get_amount(row, "total_amount")?,
            payment_method: payment_method
                .parse()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "payment_method".to_string(),
                    source: Box::new(e),
                })?,
            amount_tendered: try_get_amount(row, "amount_tendered")?,
            change: try_get_amount(row, "change_amount")?,
            cashier: OperatorUuid::from_uuid(row.try_get("cashier_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            subtotal: try_get_amount(row, "subtotal")?,
        })
    }
}
