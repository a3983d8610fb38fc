use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::moralis::DEFAULT_MORALIS_BASE_URL;
use super::provider::IpfsUploadProvider;
use super::MoralisClient;
use crate::envvar::non_empty_env;

pub const DEFAULT_API_KEY_ENV: &str = "MORALIS_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the IPFS upload provider
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IpfsUploadConfig {
    Moralis {
        #[serde(default = "default_base_url")]
        base_url: String,
        /// Name of environment variable containing the API key
        #[serde(default = "default_api_key_env")]
        api_key_env: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

fn default_base_url() -> String {
    DEFAULT_MORALIS_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for IpfsUploadConfig {
    fn default() -> Self {
        IpfsUploadConfig::Moralis {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl IpfsUploadConfig {
    pub fn provider_type(&self) -> &'static str {
        match self {
            IpfsUploadConfig::Moralis { .. } => "moralis",
        }
    }

    pub fn base_url(&self) -> &str {
        match self {
            IpfsUploadConfig::Moralis { base_url, .. } => base_url,
        }
    }

    pub fn base_url_mut(&mut self) -> &mut String {
        match self {
            IpfsUploadConfig::Moralis { base_url, .. } => base_url,
        }
    }

    /// Create a provider instance from this configuration.
    /// Fails with "<ENV> must be set" when the API key variable is missing or empty.
    pub fn create_provider(&self) -> Result<Arc<dyn IpfsUploadProvider>> {
        match self {
            IpfsUploadConfig::Moralis {
                base_url,
                api_key_env,
                timeout_secs,
            } => {
                let api_key = non_empty_env(api_key_env)
                    .ok_or_else(|| anyhow::anyhow!("{api_key_env} must be set"))?;
                let client = MoralisClient::new(
                    base_url.clone(),
                    api_key,
                    Duration::from_secs(*timeout_secs),
                )
                .with_context(|| format!("creating {} client", self.provider_type()))?;
                Ok(Arc::new(client))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        ipfs_upload_provider: IpfsUploadConfig,
    }

    #[test]
    fn deserializes_with_defaults() {
        let parsed: Wrapper = toml::from_str(
            r#"
[ipfs_upload_provider]
type = "moralis"
"#,
        )
        .unwrap();
        assert_eq!(parsed.ipfs_upload_provider, IpfsUploadConfig::default());
        assert_eq!(parsed.ipfs_upload_provider.base_url(), DEFAULT_MORALIS_BASE_URL);
    }

    #[test]
    fn deserializes_explicit_values() {
        let parsed: Wrapper = toml::from_str(
            r#"
[ipfs_upload_provider]
type = "moralis"
base_url = "http://localhost:9000/api"
api_key_env = "CUSTOM_KEY"
timeout_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(
            parsed.ipfs_upload_provider,
            IpfsUploadConfig::Moralis {
                base_url: "http://localhost:9000/api".to_string(),
                api_key_env: "CUSTOM_KEY".to_string(),
                timeout_secs: 5,
            }
        );
    }

    #[test]
    fn rejects_unknown_provider_type() {
        let parsed: Result<Wrapper, _> = toml::from_str(
            r#"
[ipfs_upload_provider]
type = "filecoin"
"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn create_provider_requires_api_key() {
        std::env::remove_var("PINRELAY_TEST_MISSING_KEY");
        let cfg = IpfsUploadConfig::Moralis {
            base_url: default_base_url(),
            api_key_env: "PINRELAY_TEST_MISSING_KEY".to_string(),
            timeout_secs: 1,
        };
        let err = cfg.create_provider().err().unwrap();
        assert_eq!(err.to_string(), "PINRELAY_TEST_MISSING_KEY must be set");
    }

    #[test]
    fn create_provider_rejects_empty_api_key() {
        std::env::set_var("PINRELAY_TEST_EMPTY_KEY", "");
        let cfg = IpfsUploadConfig::Moralis {
            base_url: default_base_url(),
            api_key_env: "PINRELAY_TEST_EMPTY_KEY".to_string(),
            timeout_secs: 1,
        };
        assert!(cfg.create_provider().is_err());
        std::env::remove_var("PINRELAY_TEST_EMPTY_KEY");
    }

    #[test]
    fn create_provider_with_api_key() {
        std::env::set_var("PINRELAY_TEST_PRESENT_KEY", "secret");
        let cfg = IpfsUploadConfig::Moralis {
            base_url: "http://localhost:1234".to_string(),
            api_key_env: "PINRELAY_TEST_PRESENT_KEY".to_string(),
            timeout_secs: 1,
        };
        let provider = cfg.create_provider().unwrap();
        assert_eq!(provider.provider_type(), "moralis");
        assert_eq!(provider.provider_url(), "http://localhost:1234");
        std::env::remove_var("PINRELAY_TEST_PRESENT_KEY");
    }
}
