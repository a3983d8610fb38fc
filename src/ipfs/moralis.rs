use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, info};

use crate::USER_AGENT;

use super::file::IpfsFile;
use super::provider::{IpfsUploadProvider, UploadedFile};

pub const DEFAULT_MORALIS_BASE_URL: &str = "https://deep-index.moralis.io/api/v2";

const API_KEY_HEADER: &str = "X-API-Key";

/// Client for the Moralis IPFS folder upload endpoint.
/// https://docs.moralis.io/web3-data-api/evm/reference/upload-folder
#[derive(Clone)]
pub struct MoralisClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl MoralisClient {
    pub fn new<T: Into<String>>(base_url: T, api_key: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("building reqwest client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn upload_url(&self) -> String {
        format!("{}/ipfs/uploadFolder", self.base_url)
    }
}

#[async_trait]
impl IpfsUploadProvider for MoralisClient {
    fn provider_type(&self) -> &str {
        "moralis"
    }

    fn provider_url(&self) -> &str {
        &self.base_url
    }

    async fn upload_files(&self, files: &[IpfsFile]) -> Result<Vec<UploadedFile>> {
        if files.is_empty() {
            return Err(anyhow::anyhow!("no files to upload"));
        }

        let res = self
            .http
            .post(self.upload_url())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(files)
            .send()
            .await
            .context("failed to make HTTP request")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read response body")?;

        debug!("response data: {}", text);
        info!(
            "{} upload of {} file(s) returned status code {}",
            self.provider_type(),
            files.len(),
            status.as_u16()
        );

        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "API call failed with status code {}",
                status.as_u16()
            ));
        }

        let uploaded: Vec<UploadedFile> =
            serde_json::from_str(&text).context("Failed to parse IPFS response")?;
        if uploaded.is_empty() {
            return Err(anyhow::anyhow!("No files were uploaded"));
        }

        Ok(uploaded)
    }
}
