pub mod config;
pub mod envvar;
pub mod ipfs;
pub mod logging;
pub mod server;

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Short git commit the binary was built from, or "unknown"
pub const GIT_COMMIT: &str = env!("GIT_COMMIT");
