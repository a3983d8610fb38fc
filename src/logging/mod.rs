use std::fmt;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

struct NoTime;

impl FormatTime for NoTime {
    fn format_time(&self, _: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        Ok(())
    }
}

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable lines without timestamps
    Text,
    /// One JSON object per line
    Json,
}

/// Directives used when RUST_LOG is not set. `tower_http` request spans
/// follow the crate level so `debug` shows per-request traces.
fn default_directives(log_level: &LogLevel) -> String {
    let level = Level::from(log_level.clone()).to_string().to_lowercase();
    format!("{level},tower_http={level}")
}

pub fn init(log_level: LogLevel, log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&log_level)));

    match log_format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_timer(NoTime)
            .with_target(false)
            .with_span_events(FmtSpan::NONE)
            .with_level(true)
            .with_ansi(true)
            .with_env_filter(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_target(true)
            .with_env_filter(filter)
            .init(),
    }
}
