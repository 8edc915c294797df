use std::path::PathBuf;
use std::sync::Arc;

use labeler_worker::ImageProcessor;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the processor is a channel handle and the rest is
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Handle to the single-writer image processor.
    pub processor: ImageProcessor,
    /// Resolved unlabeled root, listed for previews and served under `/img`.
    pub unlabeled_root: Arc<PathBuf>,
}
