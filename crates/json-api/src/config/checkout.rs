//! Checkout Config

use clap::Args;
use jiff::SignedDuration;

/// Checkout and stock settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Stock level at or below which a product is reported as running low
    #[arg(long, env = "LOW_STOCK_THRESHOLD", default_value_t = 5_u64)]
    pub low_stock_threshold: u64,

    /// Minutes a session cart may sit untouched before it is discarded
    #[arg(long, env = "CART_IDLE_TIMEOUT_MINUTES", default_value_t = 30_u32)]
    pub cart_idle_timeout_minutes: u32,
}

impl CheckoutConfig {
    #[must_use]
    pub fn cart_idle_timeout(&self) -> SignedDuration {
        SignedDuration::from_mins(i64::from(self.cart_idle_timeout_minutes))
    }
}
