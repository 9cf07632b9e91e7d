//! State

use std::sync::Arc;

use till_app::context::AppContext;

use crate::sessions::CartSessions;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) carts: Arc<CartSessions>,

    /// Default threshold for the low-stock report.
    pub(crate) low_stock_threshold: u64,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, carts: CartSessions, low_stock_threshold: u64) -> Self {
        Self {
            app,
            carts: Arc::new(carts),
            low_stock_threshold,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(
        app: AppContext,
        carts: CartSessions,
        low_stock_threshold: u64,
    ) -> Arc<Self> {
        Arc::new(Self::new(app, carts, low_stock_threshold))
    }
}
