use log::debug;
use std::time::{Duration, Instant};

use crate::runtime::Runtime;

/// Minimum time between network calls in milliseconds.
pub const DEFAULT_MIN_REQUEST_INTERVAL_MS: u64 = 750;

/// Keeps consecutive network calls at least `min_interval` apart by
/// sleeping the caller. There is no queue: one caller, one call at a time.
#[derive(Debug, Clone)]
pub struct RequestThrottle {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RequestThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Wait until the next call is allowed, then record it as made now.
    pub async fn wait<R: Runtime>(&mut self, runtime: &R) {
        if let Some(last) = self.last_request {
            let elapsed = runtime.now().saturating_duration_since(last);
            if elapsed < self.min_interval {
                let remaining = self.min_interval - elapsed;
                debug!("Throttling request for {:?}", remaining);
                runtime.sleep(remaining).await;
            }
        }
        self.last_request = Some(runtime.now());
    }
}
