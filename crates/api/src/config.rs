use std::path::PathBuf;
use std::time::Duration;

use labeler_worker::ProcessorConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local use.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory of images awaiting a label.
    pub unlabeled_path: PathBuf,
    /// Directory receiving labeled images and their annotations.
    pub labeled_path: PathBuf,
    /// Maximum number of previews listed around the current image.
    pub preview_limit: usize,
    /// Bound on handing a command to the image processor.
    pub submit_timeout_ms: u64,
    /// Bound on waiting for the image processor's response.
    pub response_timeout_ms: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `UNLABELED_PATH`       | `./unlabeled`              |
    /// | `LABELED_PATH`         | `./labeled`                |
    /// | `PREVIEW_LIMIT`        | `10`                       |
    /// | `SUBMIT_TIMEOUT_MS`    | `1000`                     |
    /// | `RESPONSE_TIMEOUT_MS`  | `1000`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let unlabeled_path = std::env::var("UNLABELED_PATH")
            .unwrap_or_else(|_| "./unlabeled".into())
            .into();

        let labeled_path = std::env::var("LABELED_PATH")
            .unwrap_or_else(|_| "./labeled".into())
            .into();

        let preview_limit: usize = std::env::var("PREVIEW_LIMIT")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("PREVIEW_LIMIT must be a valid usize");

        let submit_timeout_ms: u64 = std::env::var("SUBMIT_TIMEOUT_MS")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("SUBMIT_TIMEOUT_MS must be a valid u64");

        let response_timeout_ms: u64 = std::env::var("RESPONSE_TIMEOUT_MS")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("RESPONSE_TIMEOUT_MS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            unlabeled_path,
            labeled_path,
            preview_limit,
            submit_timeout_ms,
            response_timeout_ms,
        }
    }

    /// Timeouts for the image processor.
    pub fn processor_config(&self) -> ProcessorConfig {
        ProcessorConfig {
            submit_timeout: Duration::from_millis(self.submit_timeout_ms),
            response_timeout: Duration::from_millis(self.response_timeout_ms),
        }
    }
}
