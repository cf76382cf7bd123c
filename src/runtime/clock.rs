//! Monotonic clock and sleeping.

use std::time::{Duration, Instant};

use super::RealRuntime;

impl RealRuntime {
    pub(crate) fn now_impl(&self) -> Instant {
        Instant::now()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) async fn sleep_impl(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}
