//! Invalidation signal sent to the rendering layer after a mutation.
//!
//! Delivery is fire-and-forget: a revalidator cannot fail an action, and
//! callers never wait on the result of a refresh.

use crate::content::ContentKind;
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

/// Receives the paths whose rendered output is stale.
#[async_trait]
pub trait Revalidator: Send + Sync {
    async fn revalidate(&self, paths: &[String]);
}

/// Paths to refresh after mutating `kind`.
///
/// Includes the public pages rendering the kind, its admin page and, for
/// sluggable kinds, the detail page of every slug given.
#[must_use]
pub fn paths_for(kind: ContentKind, slugs: &[&str]) -> Vec<String> {
    let mut paths: Vec<String> = kind
        .public_paths()
        .iter()
        .map(|p| (*p).to_string())
        .collect();
    if let Some(prefix) = kind.detail_prefix() {
        if !paths.iter().any(|p| p == prefix) {
            paths.push(prefix.to_string());
        }
        for slug in slugs {
            let detail = format!("{prefix}/{slug}");
            if !paths.contains(&detail) {
                paths.push(detail);
            }
        }
    }
    paths.push(kind.admin_path().to_string());
    paths
}

/// Logs each refresh request.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRevalidator;

#[async_trait]
impl Revalidator for TracingRevalidator {
    async fn revalidate(&self, paths: &[String]) {
        for path in paths {
            info!(path = %path, "Revalidate");
        }
    }
}

/// Collects every path it is asked to refresh.
#[derive(Debug, Default)]
pub struct RecordingRevalidator {
    paths: Mutex<Vec<String>>,
}

impl RecordingRevalidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every path received so far, in arrival order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.paths
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut paths) = self.paths.lock() {
            paths.clear();
        }
    }
}

#[async_trait]
impl Revalidator for RecordingRevalidator {
    async fn revalidate(&self, paths: &[String]) {
        if let Ok(mut recorded) = self.paths.lock() {
            recorded.extend(paths.iter().cloned());
        }
    }
}
