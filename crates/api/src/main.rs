use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use labeler_api::config::ServerConfig;
use labeler_api::router::build_app_router;
use labeler_api::shutdown::shutdown_signal;
use labeler_api::state::AppState;
use labeler_worker::{AnnotationWriter, ImageProcessor, WorkerExit};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "labeler_api=debug,labeler_worker=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        unlabeled = %config.unlabeled_path.display(),
        labeled = %config.labeled_path.display(),
        "Loaded server configuration",
    );

    // --- Image processor ---
    let writer = AnnotationWriter::new(&config.unlabeled_path, &config.labeled_path)
        .expect("Failed to open image directories");
    let unlabeled_root = Arc::new(writer.unlabeled_root().to_path_buf());

    let (processor, worker) = ImageProcessor::start(writer, config.processor_config())
        .expect("Failed to start image processor");

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        processor,
        unlabeled_root,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(worker.on_exit()))
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    // The router (and every processor handle in its state) is gone, so a
    // healthy worker drains its queue and exits.
    tracing::info!("Server stopped accepting connections, waiting for image processor");
    let join = tokio::task::spawn_blocking(move || worker.join());
    let exit = match tokio::time::timeout(Duration::from_secs(5), join).await {
        Ok(Ok(exit)) => exit,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Failed to join image processor");
            WorkerExit::Panicked
        }
        Err(_) => {
            tracing::warn!("Image processor did not stop in time");
            WorkerExit::Drained
        }
    };

    match exit {
        WorkerExit::Drained => {
            tracing::info!("Graceful shutdown complete");
            ExitCode::SUCCESS
        }
        WorkerExit::Panicked => {
            tracing::error!("Image processor terminated abnormally, exiting with failure");
            ExitCode::FAILURE
        }
    }
}
