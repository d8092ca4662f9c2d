//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the log file inside the data directory.
pub const LOG_FILE_NAME: &str = "jokebox.log";

/// Installs the global tracing subscriber writing to a rotating log file.
///
/// # Level Resolution
///
/// 1. `config.log_level` if set
/// 2. `RUST_LOG`
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently gives up if the directory cannot be created
/// - Idempotent: only the first call installs a subscriber
///
/// # Example
///
/// ```rust
/// use jokebox::observability::init_tracing;
/// use jokebox::Config;
///
/// let config = Config {
///     data_dir: std::env::temp_dir().join("jokebox-doc"),
///     log_level: Some("debug".to_string()),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = config
        .log_level
        .as_deref()
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    if std::fs::create_dir_all(&config.data_dir).is_err() {
        return;
    }

    let writer = FileWriter::new(config.data_dir.join(LOG_FILE_NAME));
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}
