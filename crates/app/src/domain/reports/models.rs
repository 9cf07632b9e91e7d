//! Report Models

use jiff::civil::Date;

use crate::domain::{orders::models::PaymentMethod, products::models::ProductUuid};

/// Inclusive range of UTC calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    pub from: Date,
    pub to: Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSales {
    pub product: ProductUuid,
    pub name: String,
    pub category: String,
    pub quantity: u64,
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySales {
    pub category: String,
    pub quantity: u64,
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethodSales {
    pub payment_method: PaymentMethod,
    pub orders: u64,
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySales {
    pub date: Date,
    pub orders: u64,
    pub revenue: u64,
}

/// Sales falling in one UTC hour of the day, summed over every day of a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlySales {
    /// `0..=23`
    pub hour: u8,
    pub orders: u64,
    pub revenue: u64,
}

/// Stock on hand valued at the current price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryValue {
    pub product: ProductUuid,
    pub name: String,
    pub category: String,
    pub price: u64,
    pub stock: u64,

    /// `price * stock`, widened so it cannot overflow.
    pub value: u128,
}
