mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::listener::bind_listener;
use crate::core::middleware;
use crate::features::uploads::{routes as uploads_routes, PageService, UploadService, UploadState};
use crate::modules::storage::{LocalDiskStorage, OsRandomSource};
use crate::shared::templates::TemplateEngine;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = worker_threads(std::env::var("TOKIO_WORKER_THREADS").ok());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

/// Worker count from `TOKIO_WORKER_THREADS`; unset, unparsable or zero falls
/// back to the available parallelism.
fn worker_threads(value: Option<String>) -> usize {
    value
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        })
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Full application router: upload pages, stored files, health check,
/// public assets as fallback, and the request id / tracing layers.
fn build_router(config: &Config, state: UploadState) -> Router {
    Router::new()
        .merge(uploads_routes(state, config.app.upload_body_limit))
        .route("/health", get(health_check))
        // Stylesheet, script and background image
        .fallback_service(ServeDir::new(&config.storage.public_dir))
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // Propagate X-Request-Id to response headers
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Storage directory is created up front; failure is logged, not fatal
    let storage = LocalDiskStorage::new(config.storage.upload_dir.clone());
    match storage.ensure_root().await {
        Ok(()) => tracing::info!("Upload directory ready: {}", storage.root().display()),
        Err(e) => tracing::error!(
            "Failed to create upload directory {}: {}",
            storage.root().display(),
            e
        ),
    }

    let upload_service = Arc::new(UploadService::new(
        storage,
        Arc::new(OsRandomSource),
        config.storage.url_prefix.clone(),
    ));
    tracing::info!(
        "Upload service initialized (url prefix: {})",
        config.storage.url_prefix
    );

    let templates =
        TemplateEngine::new().map_err(|e| anyhow::anyhow!("Failed to load templates: {}", e))?;
    let page_service = Arc::new(PageService::new(templates, config.site.clone()));
    tracing::info!("Page templates loaded");

    let state = UploadState {
        uploads: upload_service,
        pages: page_service,
    };
    let app = build_router(&config, state);

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let listener = bind_listener(socket_addr)?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{AppConfig, SiteConfig, StorageConfig};
    use axum_test::TestServer;
    use std::path::Path;

    fn test_config(upload_dir: &Path, public_dir: &Path) -> Config {
        Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                upload_body_limit: None,
            },
            storage: StorageConfig {
                upload_dir: upload_dir.to_path_buf(),
                url_prefix: "/files".to_string(),
                public_dir: public_dir.to_path_buf(),
            },
            site: SiteConfig::default(),
        }
    }

    fn create_app_server(config: &Config) -> TestServer {
        let state = UploadState {
            uploads: Arc::new(UploadService::new(
                LocalDiskStorage::new(config.storage.upload_dir.clone()),
                Arc::new(OsRandomSource),
                config.storage.url_prefix.clone(),
            )),
            pages: Arc::new(PageService::new(
                TemplateEngine::new().unwrap(),
                config.site.clone(),
            )),
        };
        TestServer::new(build_router(config, state)).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let uploads = tempfile::tempdir().unwrap();
        let public = tempfile::tempdir().unwrap();
        let server = create_app_server(&test_config(uploads.path(), public.path()));

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_public_assets_are_served_from_site_root() {
        let uploads = tempfile::tempdir().unwrap();
        let public = tempfile::tempdir().unwrap();
        std::fs::write(public.path().join("styles.css"), "body { margin: 0; }").unwrap();
        let server = create_app_server(&test_config(uploads.path(), public.path()));

        let response = server.get("/styles.css").await;

        response.assert_status(StatusCode::OK);
        assert_eq!(response.text(), "body { margin: 0; }");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let uploads = tempfile::tempdir().unwrap();
        let public = tempfile::tempdir().unwrap();
        let server = create_app_server(&test_config(uploads.path(), public.path()));

        let response = server.get("/no-such-page").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_index_page_through_full_router() {
        let uploads = tempfile::tempdir().unwrap();
        let public = tempfile::tempdir().unwrap();
        let server = create_app_server(&test_config(uploads.path(), public.path()));

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("enctype=\"multipart/form-data\""));
    }

    #[test]
    fn test_worker_threads_from_env_value() {
        assert_eq!(worker_threads(Some("3".to_string())), 3);
        assert_eq!(worker_threads(Some(" 2 ".to_string())), 2);
    }

    #[test]
    fn test_worker_threads_ignores_zero_and_garbage() {
        let fallback = worker_threads(None);
        assert!(fallback > 0);
        assert_eq!(worker_threads(Some("0".to_string())), fallback);
        assert_eq!(worker_threads(Some("many".to_string())), fallback);
    }
}
