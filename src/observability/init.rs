//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
const LOG_FILE: &str = "bookscope.log";

/// Installs the global subscriber: an [`EnvFilter`] built from
/// `config.trace_level` and a `fmt` layer writing to a rotating [`FileWriter`].
///
/// Logging is optional. If the data directory cannot be created, or the level
/// string does not parse, the plugin runs without a subscriber (or with the
/// `info` default). Calling this more than once is harmless; only the first
/// subscriber is installed.
///
/// # Example
///
/// ```rust
/// use bookscope::observability::init_tracing;
/// use bookscope::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let writer = FileWriter::new(data_dir.join(LOG_FILE));

    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer);

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
