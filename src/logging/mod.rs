//! Tracing setup for the `kcic-cms` binary.

mod init;

pub use init::{init_logging, parse_rotation};

use crate::utils::kcic_home;
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::rolling::Rotation;

pub const LOG_FILENAME: &str = "kcic-cms.log";

pub struct LogConfig {
    /// Directory for the rolling log file.
    pub log_dir: PathBuf,
    /// Level for `kcic_cms` targets when `RUST_LOG` is unset.
    pub log_level: Level,
    pub json_format: bool,
    pub rotation: Rotation,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: kcic_home().join("logs"),
            log_level: Level::INFO,
            json_format: false,
            rotation: Rotation::DAILY,
        }
    }
}

impl LogConfig {
    /// Full path of the current log file prefix.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILENAME)
    }
}
