//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::tz::TimeZone;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        amounts::to_db_amount,
        carts::models::Cart,
        orders::{
            errors::OrdersServiceError,
            ids::{OrderIds, RandomOrderIds},
            models::{Checkout, Order, OrderId, OrderLine, OrderSearch, Receipt},
            repository::{OrderLineRow, OrderQuery, OrderRow, PgOrdersRepository},
        },
        products::{repository::PgProductsRepository, service::adjust_stock_in},
    },
};

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    ids: Arc<dyn OrderIds>,
    repository: PgOrdersRepository,
    products_repository: PgProductsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_order_ids(db, Arc::new(RandomOrderIds))
    }

    #[must_use]
    pub fn with_order_ids(db: Db, ids: Arc<dyn OrderIds>) -> Self {
        Self {
            db,
            ids,
            repository: PgOrdersRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    /// Write one order and its stock decrements in a single transaction.
    async fn commit_once(
        &self,
        cart: &Cart,
        checkout: &Checkout,
        total: u64,
    ) -> Result<Receipt, OrdersServiceError> {
        let id = self.ids.next_id();

        let mut tx = self.db.begin().await?;

        let order = self
            .repository
            .insert_order(
                &mut tx,
                OrderRow {
                    id: &id,
                    customer_name: checkout.customer_name.as_deref(),
                    total: to_db_amount(total)?,
                    payment_method: checkout.payment_method.as_str(),
                    amount_tendered: to_db_amount(checkout.amount_tendered)?,
                    change: to_db_amount(checkout.amount_tendered - total)?,
                    cashier: checkout.cashier,
                },
            )
            .await?;

        let mut lines = Vec::with_capacity(cart.len());

        for line in cart.lines() {
            let quantity = i64::from(line.quantity);

            let line_id = self
                .repository
                .insert_order_line(
                    &mut tx,
                    &id,
                    OrderLineRow {
                        product: line.product,
                        quantity,
                        unit_price: to_db_amount(line.unit_price)?,
                        subtotal: to_db_amount(line.subtotal)?,
                    },
                )
                .await?;

            lines.push(OrderLine {
                id: line_id,
                product: line.product,
                product_name: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                subtotal: line.subtotal,
            });
        }

        // Row locks are always taken in product order, so two carts holding
        // the same products never wait on each other in a cycle.
        let mut decrements: Vec<_> = cart
            .lines()
            .iter()
            .map(|line| (line.product, i64::from(line.quantity)))
            .collect();
        decrements.sort_unstable_by_key(|(product, _)| *product);

        for (product, quantity) in decrements {
            adjust_stock_in(&self.products_repository, &mut tx, product, -quantity).await?;
        }

        tx.commit().await?;

        Ok(Receipt { order, lines })
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn commit(
        &self,
        cart: &mut Cart,
        checkout: Checkout,
    ) -> Result<Receipt, OrdersServiceError> {
        if cart.is_empty() {
            warn!("checkout rejected: cart is empty");

            return Err(OrdersServiceError::EmptyCart);
        }

        let total = cart.total();

        if checkout.amount_tendered < total {
            warn!(
                total,
                tendered = checkout.amount_tendered,
                "checkout rejected: insufficient payment"
            );

            return Err(OrdersServiceError::InsufficientPayment {
                total,
                tendered: checkout.amount_tendered,
            });
        }

        let checkout = Checkout {
            customer_name: checkout
                .customer_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            ..checkout
        };

        let receipt = match self.commit_once(cart, &checkout, total).await {
            Err(OrdersServiceError::DuplicateId) => {
                warn!("order id collision, retrying with a fresh id");

                self.commit_once(cart, &checkout, total).await
            }
            result => result,
        }
        .inspect_err(|error| warn!(%error, "checkout failed"))?;

        cart.clear();

        info!(
            order = %receipt.order.id,
            total = receipt.order.total,
            lines = receipt.lines.len(),
            cashier = %receipt.order.cashier,
            "order committed"
        );

        Ok(receipt)
    }

    async fn get_order(&self, order: &OrderId) -> Result<Receipt, OrdersServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let header = self.repository.get_order(&mut tx, order).await?;
        let lines = self.repository.get_order_lines(&mut tx, order).await?;

        tx.commit().await?;

        Ok(Receipt {
            order: header,
            lines,
        })
    }

    async fn recent_orders(&self, limit: u32) -> Result<Vec<Order>, OrdersServiceError> {
        self.search_orders(OrderSearch {
            limit,
            ..OrderSearch::default()
        })
        .await
    }

    async fn search_orders(&self, search: OrderSearch) -> Result<Vec<Order>, OrdersServiceError> {
        let keyword = search
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty());

        let since = search
            .from
            .map(|date| date.to_zoned(TimeZone::UTC))
            .transpose()?
            .map(|zoned| zoned.timestamp());

        let until = search
            .to
            .map(|date| date.tomorrow()?.to_zoned(TimeZone::UTC))
            .transpose()?
            .map(|zoned| zoned.timestamp());

        let mut tx = self.db.begin_read_only().await?;

        let orders = self
            .repository
            .search_orders(
                &mut tx,
                OrderQuery {
                    keyword,
                    since,
                    until,
                    limit: i64::from(search.limit),
                },
            )
            .await?;

        tx.commit().await?;

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Commits the cart as one order, decrementing stock for every line.
    ///
    /// Either the order, all of its lines and all stock changes persist, or
    /// none of them do. The cart is cleared only on success.
    async fn commit(&self, cart: &mut Cart, checkout: Checkout)
    -> Result<Receipt, OrdersServiceError>;

    /// Retrieve an order with its lines.
    async fn get_order(&self, order: &OrderId) -> Result<Receipt, OrdersServiceError>;

    /// Latest orders, newest first.
    async fn recent_orders(&self, limit: u32) -> Result<Vec<Order>, OrdersServiceError>;

    /// Orders matching the search, newest first.
    async fn search_orders(&self, search: OrderSearch) -> Result<Vec<Order>, OrdersServiceError>;
}
