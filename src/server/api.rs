use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "IPFS upload successful";

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct UploadFileResponse {
    #[schema(example = "IPFS upload successful")]
    pub message: String,
    /// Content-addressed path of the uploaded file
    #[schema(example = "https://ipfs.moralis.io:2053/ipfs/QmFolder/photo.png")]
    pub path: String,
}

impl UploadFileResponse {
    pub fn new(path: String) -> Self {
        Self {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            path,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct UploadFilesResponse {
    #[schema(example = "IPFS upload successful")]
    pub message: String,
    /// Content-addressed paths, in the order returned by the provider
    pub paths: Vec<String>,
}

impl UploadFilesResponse {
    pub fn new(paths: Vec<String>) -> Self {
        Self {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            paths,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "no files provided")]
    pub error: String,
}

/// Multipart body of `POST /upload-file`
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UploadFileForm {
    /// The file to upload
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Multipart body of `POST /upload-files`
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UploadFilesForm {
    /// One part per file, all under the `files` field name
    #[schema(value_type = Vec<String>)]
    files: Vec<Vec<u8>>,
}

/// Responder that writes JSON indented with four spaces
pub struct PrettyJson<T>(pub StatusCode, pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        if let Err(e) = self.1.serialize(&mut ser) {
            error!("Failed to serialize response body: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response();
        }
        (
            self.0,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json; charset=utf-8"),
            )],
            buf,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn pretty_json_uses_four_space_indent() {
        let resp = PrettyJson(
            StatusCode::CREATED,
            UploadFileResponse::new("ipfs://QmOne/a.txt".to_string()),
        )
        .into_response();

        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json; charset=utf-8"
        );
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(
            text,
            "{\n    \"message\": \"IPFS upload successful\",\n    \"path\": \"ipfs://QmOne/a.txt\"\n}"
        );
    }

    #[test]
    fn files_response_keeps_order() {
        let resp = UploadFilesResponse::new(vec!["b".to_string(), "a".to_string()]);
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"message": UPLOAD_SUCCESS_MESSAGE, "paths": ["b", "a"]})
        );
    }
}
