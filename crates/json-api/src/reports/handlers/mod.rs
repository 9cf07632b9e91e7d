//! Report Handlers

pub(crate) mod inventory;
pub(crate) mod low_stock;
pub(crate) mod sales;
