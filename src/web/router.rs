//! Router configuration for the Web API.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::dto::{FileEntry, MessageResponse, UploadResponse, UploadedFile};
use super::handlers::{self, AppState};
use super::middleware::create_cors_layer;

/// OpenAPI description of the gateway's operations.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Upload API",
        version = "1.0.0",
        description = "Minimal folder-scoped file storage gateway"
    ),
    paths(handlers::upload_file, handlers::list_files, handlers::delete_file),
    components(schemas(UploadResponse, UploadedFile, FileEntry, MessageResponse)),
    tags(
        (name = "files", description = "Upload, list and delete files in named folders")
    )
)]
pub struct ApiDoc;

/// Create the main API router.
///
/// Routes upload/list/delete plus the static file server over the
/// storage root, with tracing and CORS applied.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    // Leave headroom above the configured file limit for multipart framing
    let max_body = app_state.max_upload_size as usize + 1024 * 1024;

    let serve_uploads = ServeDir::new(app_state.store.root());

    Router::new()
        .route("/upload/:folder", post(handlers::upload_file))
        .route("/files/:folder", get(handlers::list_files))
        .route("/delete/:folder/:filename", delete(handlers::delete_file))
        .nest_service("/uploads", serve_uploads)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the Swagger UI router serving the API description.
///
/// The UI lives at `/swagger`, the OpenAPI document at
/// `/swagger/openapi.json`.
pub fn create_swagger_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger").url("/swagger/openapi.json", ApiDoc::openapi()))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
