use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::http::StatusCode;
use tracing::debug;

use crate::ipfs::file::sanitize_file_name;
use crate::ipfs::IpfsFile;
use crate::server::error::UploadError;

/// A file part read from a multipart form
#[derive(Debug, Clone)]
pub struct ReceivedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl ReceivedFile {
    pub fn into_ipfs_file(self) -> IpfsFile {
        IpfsFile::from_bytes(&self.file_name, &self.bytes)
    }
}

/// Why a form could not be read, with the status to answer with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub status: StatusCode,
    pub reason: String,
}

impl FormError {
    /// Error for routes that expect a single file
    pub fn into_file_error(self) -> UploadError {
        UploadError::InvalidFile {
            status: self.status,
            reason: self.reason,
        }
    }

    /// Error for routes that read a whole form
    pub fn into_form_error(self) -> UploadError {
        UploadError::InvalidForm {
            status: self.status,
            reason: self.reason,
        }
    }
}

impl From<MultipartRejection> for FormError {
    fn from(rejection: MultipartRejection) -> Self {
        Self {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for FormError {
    fn from(err: MultipartError) -> Self {
        Self {
            status: err.status(),
            reason: err.body_text(),
        }
    }
}

/// Read the file parts named `field_name` in form order, up to `max_files`.
/// Parts under other names, and parts without a usable file name, are skipped.
pub async fn collect_files(
    multipart: &mut Multipart,
    field_name: &str,
    max_files: Option<usize>,
) -> Result<Vec<ReceivedFile>, FormError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }
        let Some(file_name) = field.file_name().and_then(sanitize_file_name) else {
            debug!("Skipping '{}' part without a file name", field_name);
            continue;
        };
        let bytes = field.bytes().await?;
        debug!("Received '{}' ({} bytes)", file_name, bytes.len());
        files.push(ReceivedFile { file_name, bytes });
        if max_files.is_some_and(|max| files.len() >= max) {
            break;
        }
    }
    Ok(files)
}
