use std::sync::Arc;
use tracing::{info, warn};

use crate::ipfs::{IpfsUploadConfig, IpfsUploadProvider};
use crate::server::error::UploadError;

pub mod api;
pub mod error;
pub mod handlers;
pub mod router;
#[cfg(test)]
pub(crate) mod testing;

pub use handlers::{handle_upload_file, handle_upload_files};
pub use router::build_router;

/// The upload provider, or why there is none.
/// The server runs without credentials and reports the reason on every upload.
#[derive(Clone)]
pub enum Uploader {
    Ready(Arc<dyn IpfsUploadProvider>),
    Unconfigured(Arc<str>),
}

impl Uploader {
    pub fn from_config(config: &IpfsUploadConfig) -> Self {
        match config.create_provider() {
            Ok(provider) => {
                info!(
                    "Created IPFS upload provider {} ({})",
                    provider.provider_type(),
                    provider.provider_url()
                );
                Uploader::Ready(provider)
            }
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(
                    "IPFS upload provider {} unavailable, uploads will be rejected: {}",
                    config.provider_type(),
                    reason
                );
                Uploader::Unconfigured(reason.into())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Uploader::Ready(_))
    }

    pub fn provider(&self) -> Result<Arc<dyn IpfsUploadProvider>, UploadError> {
        match self {
            Uploader::Ready(provider) => Ok(provider.clone()),
            Uploader::Unconfigured(reason) => Err(UploadError::Unconfigured(reason.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub uploader: Uploader,
}

impl AppState {
    pub fn new(uploader: Uploader) -> Self {
        Self { uploader }
    }

    pub fn from_config(config: &IpfsUploadConfig) -> Self {
        Self::new(Uploader::from_config(config))
    }
}
