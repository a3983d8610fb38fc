pub mod config;
pub mod file;
pub mod moralis;
pub mod provider;

pub use config::IpfsUploadConfig;
pub use file::IpfsFile;
pub use moralis::MoralisClient;
pub use provider::{IpfsUploadProvider, UploadedFile};
