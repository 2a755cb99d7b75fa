use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LOG_LEVEL;

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event (default)
    #[default]
    Json,
    /// Human-readable multi-line output
    Pretty,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is not set (default: info)
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format (default: json)
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}
