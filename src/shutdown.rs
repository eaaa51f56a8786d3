use tokio::signal;

/// Wait for an interrupt (SIGINT or SIGTERM).
///
/// A run raced against this future is abandoned as a whole; stages have no
/// cancellation points of their own.
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
            tracing::info!("Received Ctrl+C, cancelling run...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, cancelling run...");
        }
    }
}
