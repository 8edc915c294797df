#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use labeler_api::config::ServerConfig;
use labeler_api::router::build_app_router;
use labeler_api::state::AppState;
use labeler_worker::{AnnotationWriter, ImageProcessor};

/// Temporary unlabeled/labeled roots plus an app wired to them.
pub struct TestApp {
    pub app: Router,
    pub unlabeled: PathBuf,
    pub labeled: PathBuf,
    _dir: TempDir,
}

/// Build a test `ServerConfig` pointing at the given roots.
pub fn test_config(unlabeled: PathBuf, labeled: PathBuf, preview_limit: usize) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        unlabeled_path: unlabeled,
        labeled_path: labeled,
        preview_limit,
        submit_timeout_ms: 1_000,
        response_timeout_ms: 1_000,
    }
}

/// Create fresh roots holding `images` and build the full router over them.
pub fn build_test_app(images: &[&str], preview_limit: usize) -> TestApp {
    let dir = tempfile::tempdir().expect("create temp dir");
    let unlabeled = dir.path().join("unlabeled");
    let labeled = dir.path().join("labeled");
    fs::create_dir(&unlabeled).expect("create unlabeled");
    fs::create_dir(&labeled).expect("create labeled");
    for image in images {
        fs::write(unlabeled.join(image), b"image-bytes").expect("write image");
    }

    let config = test_config(unlabeled.clone(), labeled.clone(), preview_limit);
    let writer = AnnotationWriter::new(&unlabeled, &labeled).expect("writer");
    let unlabeled_root = Arc::new(writer.unlabeled_root().to_path_buf());
    let (processor, _worker) =
        ImageProcessor::start(writer, config.processor_config()).expect("start processor");

    let state = AppState {
        config: Arc::new(config.clone()),
        processor,
        unlabeled_root,
    };

    TestApp {
        app: build_app_router(state, &config),
        unlabeled,
        labeled,
        _dir: dir,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
