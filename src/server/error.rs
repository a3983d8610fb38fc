use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use crate::server::api::ErrorResponse;

/// Failures of the upload routes, rendered as `{"error": "..."}`
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// No usable upload provider, e.g. the API key is not set
    #[error("{0}")]
    Unconfigured(String),

    #[error("failed to parse file: {reason}")]
    InvalidFile { status: StatusCode, reason: String },

    #[error("failed to parse form: {reason}")]
    InvalidForm { status: StatusCode, reason: String },

    #[error("no files provided")]
    NoFiles,

    #[error("{0:#}")]
    Upstream(anyhow::Error),
}

impl UploadError {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::Unconfigured(_) | UploadError::NoFiles => StatusCode::BAD_REQUEST,
            UploadError::InvalidFile { status, .. } | UploadError::InvalidForm { status, .. } => {
                *status
            }
            UploadError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            error!("Upload failed: {}", message);
        } else {
            warn!("Rejected upload ({}): {}", status.as_u16(), message);
        }
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use axum::body::to_bytes;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unconfigured_is_bad_request() {
        let resp = UploadError::Unconfigured("MORALIS_API_KEY must be set".to_string())
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({"error": "MORALIS_API_KEY must be set"})
        );
    }

    #[tokio::test]
    async fn invalid_form_keeps_status() {
        let resp = UploadError::InvalidForm {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            reason: "length limit exceeded".to_string(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_json(resp).await["error"],
            "failed to parse form: length limit exceeded"
        );
    }

    #[tokio::test]
    async fn upstream_error_includes_cause_chain() {
        let err: anyhow::Result<()> = Err(anyhow::anyhow!("connection refused"));
        let err = err.context("failed to make HTTP request").unwrap_err();
        let resp = UploadError::Upstream(err).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(resp).await["error"],
            "failed to make HTTP request: connection refused"
        );
    }

    #[test]
    fn no_files_message() {
        assert_eq!(UploadError::NoFiles.to_string(), "no files provided");
        assert_eq!(UploadError::NoFiles.status(), StatusCode::BAD_REQUEST);
    }
}
