use crate::config::{dev, LOGGING_ENABLED};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// Timestamp layout of every log line.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Installs the global subscriber. Returns false when logging is switched off
/// by configuration or another subscriber is already installed.
pub fn init() -> bool {
    if !LOGGING_ENABLED || !dev::ENABLE_LOGGING {
        return false;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(dev::DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_target(true)
        .try_init()
        .is_ok()
}
