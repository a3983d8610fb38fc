use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::file::IpfsFile;

/// One entry of an upload reply: the content-addressed path of a stored file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedFile {
    pub path: String,
}

/// Trait for APIs that take file contents and return IPFS paths
#[async_trait]
pub trait IpfsUploadProvider: Send + Sync {
    /// Get the type of the provider (e.g., "moralis")
    fn provider_type(&self) -> &str;

    /// Base URL the provider talks to
    fn provider_url(&self) -> &str;

    /// Upload a batch of files as a single folder.
    /// On success the result holds at least one entry, in the provider's order.
    async fn upload_files(&self, files: &[IpfsFile]) -> Result<Vec<UploadedFile>>;
}
