pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /images              GET   listing with previews around ?filename=
/// /images/label        POST  label an image (form-encoded)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/images", get(handlers::images::list_images))
        .route("/images/label", post(handlers::images::label_image))
}
