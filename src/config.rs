// Application configuration.
// Logging can only be switched off in development builds.

use serde::Deserialize;
use std::time::Duration;

#[cfg(debug_assertions)]
pub const LOGGING_ENABLED: bool = true; // logging is on in debug builds

#[cfg(not(debug_assertions))]
pub const LOGGING_ENABLED: bool = false; // logging is off in production

// Extra knobs for development builds
#[cfg(debug_assertions)]
pub mod dev {
    // Flip to false to silence logging while developing.
    // Only honoured in debug builds.
    pub const ENABLE_LOGGING: bool = true;
    pub const DEFAULT_FILTER: &str = "mini_zoom_lib=debug";
}

#[cfg(not(debug_assertions))]
pub mod dev {
    pub const ENABLE_LOGGING: bool = false;
    pub const DEFAULT_FILTER: &str = "mini_zoom_lib=info";
}

/// Largest file accepted by `send_file`, in bytes.
pub const MAX_FILE_SIZE: usize = 5_000_000;

/// Media server the rooms live on.
pub const LIVEKIT_URL: &str = "wss://agutech-mini-zoom-dtc5dowj.livekit.cloud";

/// Runtime settings of a controller. Durations are milliseconds in JSON.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    pub livekit_url: String,
    pub max_file_size: usize,
    pub participant_refresh_delay_ms: u64,
    pub publish_wait_attempts: u32,
    pub publish_wait_interval_ms: u64,
    pub banner_ttl_ms: u64,
    pub meeting_start: String,
    pub meeting_end: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8888".into(),
            livekit_url: LIVEKIT_URL.into(),
            max_file_size: MAX_FILE_SIZE,
            participant_refresh_delay_ms: 400,
            publish_wait_attempts: 10,
            publish_wait_interval_ms: 200,
            banner_ttl_ms: 4_000,
            meeting_start: "now".into(),
            meeting_end: "later".into(),
        }
    }
}

impl Config {
    /// Missing keys fall back to the defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn participant_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.participant_refresh_delay_ms)
    }

    pub fn publish_wait_interval(&self) -> Duration {
        Duration::from_millis(self.publish_wait_interval_ms)
    }

    pub fn banner_ttl(&self) -> Duration {
        Duration::from_millis(self.banner_ttl_ms)
    }
}
