use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{error, info};

use crate::envvar::resolve_env_placeholders;
use crate::ipfs::IpfsUploadConfig;

/// 32 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// HTTP surface settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Largest request body accepted by the upload routes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Configuration file as written on disk
#[derive(Debug, Default, Deserialize)]
pub struct ConfigRaw {
    #[serde(default)]
    pub server: ServerConfig,

    /// IPFS upload provider; Moralis with default settings when omitted
    #[serde(default)]
    pub ipfs_upload_provider: IpfsUploadConfig,
}

impl ConfigRaw {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }
}

/// Loaded and validated configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub ipfs_upload_provider: IpfsUploadConfig,
}

impl TryFrom<ConfigRaw> for Config {
    type Error = anyhow::Error;

    fn try_from(raw: ConfigRaw) -> Result<Self> {
        let mut ipfs_upload_provider = raw.ipfs_upload_provider;
        let base_url = ipfs_upload_provider.base_url_mut();
        *base_url = resolve_env_placeholders(base_url)
            .context("Failed to resolve environment variables in ipfs_upload_provider.base_url")?;
        validate_base_url(base_url)?;

        let mut server = raw.server;
        for origin in server.allowed_origins.iter_mut() {
            *origin = resolve_env_placeholders(origin)
                .context("Failed to resolve environment variables in server.allowed_origins")?;
        }
        if server.max_upload_bytes == 0 {
            return Err(anyhow::anyhow!("server.max_upload_bytes must be greater than 0"));
        }

        Ok(Config {
            server,
            ipfs_upload_provider,
        })
    }
}

fn validate_base_url(base_url: &str) -> Result<()> {
    let parsed = url::Url::parse(base_url)
        .with_context(|| format!("Invalid ipfs_upload_provider.base_url '{base_url}'"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(anyhow::anyhow!(
            "Unsupported scheme '{other}' in ipfs_upload_provider.base_url"
        )),
    }
}

/// Load and validate configuration with logging.
/// Without a path, defaults are used.
pub fn load_and_validate_config(config_path: Option<&str>) -> Result<Config> {
    let raw = match config_path {
        None => {
            info!("No config file given, using defaults");
            ConfigRaw::default()
        }
        Some(path) => match ConfigRaw::load_from_file(Path::new(path)) {
            Ok(raw) => {
                info!("Loaded configuration from '{}'", path);
                raw
            }
            Err(e) => {
                error!("Failed to load config from '{}': {:#}", path, e);
                return Err(e);
            }
        },
    };

    let config = Config::try_from(raw)?;
    info!(
        "IPFS upload provider: type: {}, base_url: {}",
        config.ipfs_upload_provider.provider_type(),
        config.ipfs_upload_provider.base_url()
    );
    if config.server.allowed_origins.is_empty() {
        info!("CORS: any origin allowed");
    } else {
        info!("CORS: allowed origins {:?}", config.server.allowed_origins);
    }
    Ok(config)
}
