use base64::Engine;
use serde::{Deserialize, Serialize};

/// A single file as accepted by the upload API: a path plus base64 content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IpfsFile {
    pub path: String,
    pub content: String,
}

impl IpfsFile {
    /// Encode raw file bytes for upload. `file_name` is used as the path
    /// unchanged, so pass it through [`sanitize_file_name`] first.
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Self {
        Self {
            path: file_name.to_string(),
            content: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// Strip any directory components a client sent along with the file name.
/// Whitespace is significant and kept. Returns `None` when nothing usable is left.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    match base {
        "" | "." | ".." => None,
        other => Some(other.to_string()),
    }
}
