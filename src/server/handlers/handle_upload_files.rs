use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use crate::ipfs::{IpfsFile, IpfsUploadProvider};
use crate::server::api::{ErrorResponse, PrettyJson, UploadFilesForm, UploadFilesResponse};
use crate::server::error::UploadError;
use crate::server::handlers::multipart::{collect_files, FormError, ReceivedFile};
use crate::server::AppState;

pub const FILES_FIELD: &str = "files";

async fn upload_multiple_files(
    provider: &dyn IpfsUploadProvider,
    files: Vec<ReceivedFile>,
) -> Result<Vec<String>, UploadError> {
    if files.is_empty() {
        return Err(UploadError::NoFiles);
    }
    let ipfs_files: Vec<IpfsFile> = files.into_iter().map(ReceivedFile::into_ipfs_file).collect();
    let uploaded = provider
        .upload_files(&ipfs_files)
        .await
        .map_err(UploadError::Upstream)?;
    let paths: Vec<String> = uploaded.into_iter().map(|f| f.path).collect();
    info!(
        "Uploaded {} file(s), provider returned {} path(s)",
        ipfs_files.len(),
        paths.len()
    );
    Ok(paths)
}

/// Upload several files as one folder and return their IPFS paths
#[utoipa::path(
    post,
    path = "/upload-files",
    request_body(content = UploadFilesForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Files uploaded", body = UploadFilesResponse),
        (status = 400, description = "Provider not configured, malformed form or no files", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Upload provider failed", body = ErrorResponse)
    ),
    tag = "uploads"
)]
pub async fn handle_upload_files(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<PrettyJson<UploadFilesResponse>, UploadError> {
    let provider = state.uploader.provider()?;

    let mut multipart = multipart.map_err(|e| FormError::from(e).into_form_error())?;
    let files = collect_files(&mut multipart, FILES_FIELD, None)
        .await
        .map_err(FormError::into_form_error)?;

    let paths = upload_multiple_files(provider.as_ref(), files).await?;
    Ok(PrettyJson(StatusCode::CREATED, UploadFilesResponse::new(paths)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::testing::MockUploader;
    use axum::body::Bytes;

    fn received(name: &str, data: &'static [u8]) -> ReceivedFile {
        ReceivedFile {
            file_name: name.to_string(),
            bytes: Bytes::from_static(data),
        }
    }

    #[tokio::test]
    async fn uploads_all_files_in_order() {
        let mock = MockUploader::with_paths(&["ipfs://QmDir/one.txt", "ipfs://QmDir/two.txt"]);
        let paths = upload_multiple_files(
            &mock,
            vec![received("one.txt", b"1"), received("two.txt", b"2")],
        )
        .await
        .unwrap();

        assert_eq!(paths, vec!["ipfs://QmDir/one.txt", "ipfs://QmDir/two.txt"]);
        let sent = mock.received();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], IpfsFile::from_bytes("one.txt", b"1"));
        assert_eq!(sent[1], IpfsFile::from_bytes("two.txt", b"2"));
    }

    #[tokio::test]
    async fn no_files_is_rejected_before_upload() {
        let mock = MockUploader::with_paths(&["unused"]);
        let err = upload_multiple_files(&mock, Vec::new()).await.unwrap_err();
        assert!(matches!(err, UploadError::NoFiles));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn provider_error_is_internal() {
        let mock = MockUploader::failing("No files were uploaded");
        let err = upload_multiple_files(&mock, vec![received("a", b"a")])
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "No files were uploaded");
    }
}
