mod atomic;

pub use atomic::atomic_write_json;

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Name of the per-user folder holding config, data and logs.
pub const KCIC_FOLDER: &str = ".kcic";

/// Root of the per-user folder (`~/.kcic`), or `./.kcic` without a home dir.
#[must_use]
pub fn kcic_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(KCIC_FOLDER)
}

/// Current UTC time.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Generate a fresh record identifier.
#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
