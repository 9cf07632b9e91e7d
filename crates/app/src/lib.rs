//! Shared point-of-sale domain and persistence modules.

pub mod context;
pub mod database;
pub mod domain;
pub mod uuids;

pub use domain::{carts, operators, orders, products, reports};

#[cfg(test)]
mod test;
