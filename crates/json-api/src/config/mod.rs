//! Server configuration module

use clap::Parser;

use crate::config::{
    checkout::CheckoutConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod checkout;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Till JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "till-json", about = "Till JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Checkout and stock settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_arguments_override_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "till-json",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--database-url",
            "postgres://localhost/till",
            "--database-max-connections",
            "4",
            "--low-stock-threshold",
            "3",
            "--cart-idle-timeout-minutes",
            "15",
        ])?;

        assert_eq!(config.socket_addr(), "127.0.0.1:9000");
        assert_eq!(config.database.database_max_connections, 4);
        assert_eq!(config.checkout.low_stock_threshold, 3);
        assert_eq!(
            config.checkout.cart_idle_timeout(),
            jiff::SignedDuration::from_mins(15)
        );

        Ok(())
    }
}
