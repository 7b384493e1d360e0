use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::features::uploads::handlers::{index_page, upload_file};
use crate::features::uploads::services::{PageService, UploadService};

/// Path the upload form posts to
pub const UPLOAD_PATH: &str = "/upload";

/// Shared state for the upload handlers
#[derive(Clone)]
pub struct UploadState {
    pub uploads: Arc<UploadService>,
    pub pages: Arc<PageService>,
}

/// Create routes for the uploads feature
///
/// Also mounts the storage directory under the URL prefix so every stored
/// file is retrievable as soon as its write completes.
pub fn routes(state: UploadState, body_limit: Option<usize>) -> Router {
    let body_limit = match body_limit {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    let files = ServeDir::new(state.uploads.storage().root());
    let url_prefix = state.uploads.url_prefix().to_string();

    Router::new()
        .route("/", get(index_page))
        .route(UPLOAD_PATH, post(upload_file).layer(body_limit))
        .nest_service(&url_prefix, files)
        .with_state(state)
}
