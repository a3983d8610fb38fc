use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use crate::ipfs::IpfsUploadProvider;
use crate::server::api::{ErrorResponse, PrettyJson, UploadFileForm, UploadFileResponse};
use crate::server::error::UploadError;
use crate::server::handlers::multipart::{collect_files, FormError, ReceivedFile};
use crate::server::AppState;

pub const FILE_FIELD: &str = "file";

async fn upload_single_file(
    provider: &dyn IpfsUploadProvider,
    file: ReceivedFile,
) -> Result<String, UploadError> {
    let file_name = file.file_name.clone();
    let uploaded = provider
        .upload_files(&[file.into_ipfs_file()])
        .await
        .map_err(UploadError::Upstream)?;
    let path = uploaded
        .into_iter()
        .next()
        .map(|f| f.path)
        .ok_or_else(|| UploadError::Upstream(anyhow::anyhow!("No files were uploaded")))?;
    info!("Uploaded '{}' to {}", file_name, path);
    Ok(path)
}

/// Upload one file and return its IPFS path
#[utoipa::path(
    post,
    path = "/upload-file",
    request_body(content = UploadFileForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File uploaded", body = UploadFileResponse),
        (status = 400, description = "Provider not configured or no file in the form", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Upload provider failed", body = ErrorResponse)
    ),
    tag = "uploads"
)]
pub async fn handle_upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<PrettyJson<UploadFileResponse>, UploadError> {
    let provider = state.uploader.provider()?;

    let mut multipart = multipart.map_err(|e| FormError::from(e).into_file_error())?;
    let file = collect_files(&mut multipart, FILE_FIELD, Some(1))
        .await
        .map_err(FormError::into_file_error)?
        .into_iter()
        .next()
        .ok_or_else(|| UploadError::InvalidFile {
            status: StatusCode::BAD_REQUEST,
            reason: format!("no '{FILE_FIELD}' file in form"),
        })?;

    let path = upload_single_file(provider.as_ref(), file).await?;
    Ok(PrettyJson(StatusCode::CREATED, UploadFileResponse::new(path)))
}
