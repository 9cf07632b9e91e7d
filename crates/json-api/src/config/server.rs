//! Server Config

use clap::Args;

/// Listening address and port of the till API.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Address to bind; IPv6 literals may be given with or without brackets
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8080_u16)]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// `host:port`, bracketing bare IPv6 hosts.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        let host = self.host.trim();

        if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]:{}", self.port)
        } else {
            format!("{host}:{}", self.port)
        }
    }
}
