//! Order Models

use std::{fmt, str::FromStr};

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{operators::models::OperatorUuid, products::models::ProductUuid};

/// Number of orders returned by a search when no limit is given.
pub const DEFAULT_ORDER_LIMIT: u32 = 100;

/// Order identifier, e.g. `TRX-20260315-9f3a1c07`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Debit,
    Credit,
    Qris,
}

#[derive(Debug, Error)]
#[error("unknown payment method `{0}`")]
pub struct UnknownPaymentMethod(pub String);

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Debit => "debit",
            Self::Credit => "credit",
            Self::Qris => "qris",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cash" => Ok(Self::Cash),
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            "qris" => Ok(Self::Qris),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// Order Model
///
/// The committed header. Orders are never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: Option<String>,
    pub total: u64,
    pub payment_method: PaymentMethod,
    pub amount_tendered: u64,
    pub change: u64,
    pub cashier: OperatorUuid,
    pub created_at: Timestamp,
}

/// Order Line Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub id: i64,
    pub product: ProductUuid,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub subtotal: u64,
}

/// An order with its lines, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

/// Payment details for committing a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub customer_name: Option<String>,
    pub payment_method: PaymentMethod,
    pub amount_tendered: u64,
    pub cashier: OperatorUuid,
}

/// Order search criteria.
///
/// `from` and `to` are inclusive UTC calendar days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSearch {
    /// Case-insensitive substring of the order id or customer name.
    pub keyword: Option<String>,
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub limit: u32,
}

impl Default for OrderSearch {
    fn default() -> Self {
        Self {
            keyword: None,
            from: None,
            to: None,
            limit: DEFAULT_ORDER_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_parses_its_own_name() {
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::Debit,
            PaymentMethod::Credit,
            PaymentMethod::Qris,
        ] {
            assert_eq!(method.as_str().parse::<PaymentMethod>().ok(), Some(method));
        }
    }

    #[test]
    fn unknown_payment_method_is_rejected() {
        assert!("voucher".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn default_search_uses_default_limit() {
        assert_eq!(OrderSearch::default().limit, DEFAULT_ORDER_LIMIT);
    }
}
