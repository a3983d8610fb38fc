use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::ServerConfig;
use crate::server::api::{
    ErrorResponse, UploadFileForm, UploadFileResponse, UploadFilesForm, UploadFilesResponse,
};
use crate::server::handlers::handle_upload_file::{__path_handle_upload_file, handle_upload_file};
use crate::server::handlers::handle_upload_files::{
    __path_handle_upload_files, handle_upload_files,
};
use crate::server::AppState;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(handle_upload_file, handle_upload_files),
    components(schemas(
        UploadFileForm,
        UploadFilesForm,
        UploadFileResponse,
        UploadFilesResponse,
        ErrorResponse
    )),
    tags((name = "uploads", description = "Relay multipart uploads to IPFS")),
    info(
        title = "pinrelay",
        description = "Accepts multipart file uploads, base64-encodes them and forwards them to an IPFS upload API."
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Permissive by default: any origin, the usual methods and headers, 12h preflight cache
fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_LENGTH, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(12 * 60 * 60));

    if allowed_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

pub fn build_router(state: AppState, server_config: &ServerConfig) -> Result<Router> {
    let upload_router = Router::new()
        .route("/upload-file", post(handle_upload_file))
        .route("/upload-files", post(handle_upload_files))
        .layer(DefaultBodyLimit::max(server_config.max_upload_bytes))
        .with_state(state);

    let router = Router::new()
        .route(OPENAPI_PATH, get(openapi_json))
        .merge(upload_router)
        .layer(cors_layer(&server_config.allowed_origins)?)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
