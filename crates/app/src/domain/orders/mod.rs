//! Orders

pub mod errors;
pub mod ids;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use ids::*;
pub use service::*;
