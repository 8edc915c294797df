//! Shutdown trigger for the HTTP server.

use std::future::Future;

use labeler_worker::WorkerExit;

/// Wait for SIGINT (Ctrl-C), SIGTERM (on Unix), or the image processor
/// terminating, which leaves the server unable to label anything.
pub async fn shutdown_signal(worker_exit: impl Future<Output = WorkerExit>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
        exit = worker_exit => {
            tracing::error!(?exit, "Image processor stopped, shutting down");
        }
    }
}
