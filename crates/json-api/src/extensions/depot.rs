//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use till_app::operators::models::Operator;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Store the operator the request was authenticated as.
    fn insert_operator(&mut self, operator: Operator);

    fn operator_or_401(&self) -> Result<&Operator, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_operator(&mut self, operator: Operator) {
        self.inject(operator);
    }

    fn operator_or_401(&self) -> Result<&Operator, StatusError> {
        self.obtain::<Operator>()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
