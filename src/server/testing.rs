use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::ipfs::{IpfsFile, IpfsUploadProvider, UploadedFile};

/// In-memory provider that records what it was asked to upload
#[derive(Clone, Default)]
pub struct MockUploader {
    paths: Vec<String>,
    error: Option<String>,
    received: Arc<Mutex<Vec<IpfsFile>>>,
    calls: Arc<Mutex<usize>>,
}

impl MockUploader {
    pub fn with_paths(paths: &[&str]) -> Self {
        Self {
            paths: paths.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn received(&self) -> Vec<IpfsFile> {
        self.received.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl IpfsUploadProvider for MockUploader {
    fn provider_type(&self) -> &str {
        "mock"
    }

    fn provider_url(&self) -> &str {
        "http://mock.invalid"
    }

    async fn upload_files(&self, files: &[IpfsFile]) -> Result<Vec<UploadedFile>> {
        *self.calls.lock().unwrap() += 1;
        self.received.lock().unwrap().extend_from_slice(files);
        if let Some(message) = &self.error {
            return Err(anyhow::anyhow!("{message}"));
        }
        Ok(self
            .paths
            .iter()
            .map(|path| UploadedFile { path: path.clone() })
            .collect())
    }
}
