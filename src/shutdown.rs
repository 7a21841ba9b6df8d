use tokio::signal;

/// Wait for a shutdown signal (SIGINT or SIGTERM).
///
/// The server stops accepting connections once this resolves, but requests
/// already running (including batches mid-way through their chunks) are
/// allowed to finish.
pub async fn wait_for_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, draining in-flight requests...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, draining in-flight requests...");
        }
    }
}
