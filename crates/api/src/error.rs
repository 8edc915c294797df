use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use labeler_core::LabelError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`LabelError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A labeling error from the core or the image processor.
    #[error(transparent)]
    Label(#[from] LabelError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Label(err) => classify_label_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a [`LabelError`] to an HTTP status, error code, and message.
///
/// Filesystem details (absolute paths, OS errors) are logged, never returned.
fn classify_label_error(err: &LabelError) -> (StatusCode, &'static str, String) {
    match err {
        LabelError::EmptyFilename | LabelError::InvalidFilename(_) | LabelError::EmptyLabel => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        LabelError::MissingInputFile(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("file \"{name}\" doesn't exist"),
            )
        }
        LabelError::SubmitTimeout | LabelError::ResponseTimeout => (
            StatusCode::SERVICE_UNAVAILABLE,
            "PROCESSOR_BUSY",
            err.to_string(),
        ),
        LabelError::WriteFailure { .. }
        | LabelError::MoveFailure { .. }
        | LabelError::InvalidRoot { .. }
        | LabelError::WorkerStopped => {
            tracing::error!(error = %err, "Label commit failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
