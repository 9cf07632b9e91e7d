//! Point-of-Sale Domain Concerns

mod amounts;
pub mod carts;
pub mod operators;
pub mod orders;
pub mod products;
pub mod reports;
