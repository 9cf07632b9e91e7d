//! Graceful shutdown on Ctrl+C or SIGTERM.

use std::{io, sync::Arc};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::{info, warn};

use crate::sessions::CartSessions;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

#[cfg(unix)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::SigTerm)?
        .recv()
        .await;

    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> Result<(), ShutdownSignalError> {
    std::future::pending().await
}

/// Wait for a shutdown signal, then stop the server gracefully.
///
/// Session carts live only in memory, so any still open are lost.
pub(crate) async fn listen(
    handle: ServerHandle,
    carts: Arc<CartSessions>,
) -> Result<(), ShutdownSignalError> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::CtrlC)?;
            info!("ctrl_c signal received");
        }
        result = terminate() => {
            result?;
            info!("terminate signal received");
        }
    };

    let open_carts = carts.open_count().await;

    if open_carts > 0 {
        warn!(open_carts, "discarding open carts on shutdown");
    }

    handle.stop_graceful(None);

    Ok(())
}
