use crate::content::ContentKind;
use std::time::{Duration, Instant};
use tracing::info;

/// Times one admin action and logs it, with its kind and outcome, on drop.
///
/// An action counts as failed unless [`OperationTimer::succeeded`] was called
/// before the timer goes out of scope.
///
/// # Example
///
/// ```ignore
/// let mut timer = OperationTimer::new("remove", ContentKind::Partner);
/// // ...
/// timer.succeeded();
/// ```
#[derive(Debug)]
pub struct OperationTimer {
    operation: &'static str,
    kind: ContentKind,
    start: Instant,
    success: bool,
}

impl OperationTimer {
    #[must_use]
    pub fn new(operation: &'static str, kind: ContentKind) -> Self {
        Self {
            operation,
            kind,
            start: Instant::now(),
            success: false,
        }
    }

    #[must_use]
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    #[must_use]
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn succeeded(&mut self) {
        self.success = true;
    }

    #[must_use]
    pub fn outcome(&self) -> &'static str {
        if self.success {
            "ok"
        } else {
            "error"
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        info!(
            operation = self.operation,
            kind = %self.kind,
            outcome = self.outcome(),
            duration_ms = %self.elapsed().as_millis(),
            "Action completed"
        );
    }
}

/// Short request id used to correlate the log lines of one action.
#[must_use]
pub fn generate_request_id() -> String {
    let uuid_str = uuid::Uuid::new_v4().to_string();
    uuid_str.get(..8).unwrap_or(&uuid_str).to_string()
}
