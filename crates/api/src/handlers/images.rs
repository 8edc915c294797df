//! Handlers for browsing unlabeled images and committing labels.

use std::path::Path;

use axum::extract::rejection::FormRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use labeler_core::command::{is_plain_filename, trim_input};
use labeler_core::{find_current_index, select_window, LabelCommand};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
   Payloads
   -------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
pub struct ListImagesQuery {
    pub filename: Option<String>,
}

/// Listing of the unlabeled root around the selected image.
#[derive(Debug, Serialize)]
pub struct ImageListing {
    /// Image to label; the first file when none (or a missing one) was requested.
    pub filename: Option<String>,
    pub previews: Vec<String>,
    /// 1-based inclusive bounds of `previews`, `0` when empty.
    pub preview_left: usize,
    pub preview_right: usize,
    pub total_files: usize,
    /// Non-fatal problems found while building the listing.
    pub errors: Vec<String>,
}

/// Result of a committed label.
#[derive(Debug, Serialize)]
pub struct LabeledImage {
    pub filename: String,
    pub annotation: String,
}

/* --------------------------------------------------------------------------
   Handlers
   -------------------------------------------------------------------------- */

/// GET /images
///
/// List unlabeled images and the preview window around `?filename=`.
pub async fn list_images(
    State(state): State<AppState>,
    Query(query): Query<ListImagesQuery>,
) -> AppResult<impl IntoResponse> {
    let root = state.unlabeled_root.as_path();
    let mut listing = ImageListing {
        filename: None,
        previews: Vec::new(),
        preview_left: 0,
        preview_right: 0,
        total_files: 0,
        errors: Vec::new(),
    };

    if let Some(requested) = query.filename.filter(|f| !f.is_empty()) {
        if is_existing_file(root, &requested).await {
            listing.filename = Some(requested);
        } else {
            listing
                .errors
                .push(format!("file \"{requested}\" doesn't exist"));
        }
    }

    let files = match list_files(root).await {
        Ok(files) => files,
        Err(e) => {
            tracing::error!(root = %root.display(), error = %e, "Failed to list images");
            listing.errors.push(format!("error searching files: {e}"));
            Vec::new()
        }
    };

    if !files.is_empty() {
        let current = match &listing.filename {
            Some(selected) => find_current_index(selected, &files),
            None => {
                listing.filename = Some(files[0].clone());
                Some(0)
            }
        };

        if let Some(current) = current {
            let window = select_window(state.config.preview_limit, &files, current);
            listing.previews = window.items.to_vec();
            listing.preview_left = window.first;
            listing.preview_right = window.last;
        }
        listing.total_files = files.len();
    }

    tracing::debug!(
        filename = ?listing.filename,
        total = listing.total_files,
        "Listed unlabeled images",
    );

    Ok(Json(DataResponse { data: listing }))
}

/// POST /images/label
///
/// Commit one labeled box from a form submission. Boxes without area are
/// rejected here, before the command reaches the image processor.
pub async fn label_image(
    State(state): State<AppState>,
    form: Result<Form<LabelCommand>, FormRejection>,
) -> AppResult<impl IntoResponse> {
    let Form(mut command) = form.map_err(|e| {
        tracing::warn!(error = %e, "Error parsing label form");
        AppError::BadRequest("error parsing request".to_string())
    })?;

    command.filename = trim_input(&command.filename).to_string();
    if command.filename.is_empty() {
        return Err(AppError::BadRequest("Filename not specified".to_string()));
    }

    command.label = trim_input(&command.label).to_string();
    if command.label.is_empty() {
        return Err(AppError::BadRequest("Label is empty".to_string()));
    }

    if !command.has_area() {
        return Err(AppError::BadRequest("Area has zero size".to_string()));
    }

    tracing::info!(filename = %command.filename, label = %command.label, "Processing label request");

    let filename = command.filename.clone();
    let outcome = state.processor.submit(command).await?;

    let annotation = outcome
        .annotation_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: LabeledImage {
                filename,
                annotation,
            },
        }),
    ))
}

/* --------------------------------------------------------------------------
   Helpers
   -------------------------------------------------------------------------- */

async fn is_existing_file(root: &Path, filename: &str) -> bool {
    if !is_plain_filename(filename) {
        return false;
    }
    tokio::fs::metadata(root.join(filename))
        .await
        .map(|meta| !meta.is_dir())
        .unwrap_or(false)
}

/// Names of the regular entries directly inside `root`, sorted.
async fn list_files(root: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(root).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            continue;
        }
        files.push(entry.file_name().to_string_lossy().into_owned());
    }

    files.sort();
    Ok(files)
}
