use reqwest::Client;
use std::time::{Duration, Instant};

/// Sign in again after this many seconds, even if the session still works.
pub const DEFAULT_SIGNIN_INTERVAL_SECS: u64 = 4 * 60 * 60;

/// A signed-in session: an HTTP client holding the service's session
/// cookies, and when it signed in.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    signed_in_at: Instant,
}

impl Session {
    pub fn new(client: Client, signed_in_at: Instant) -> Self {
        Self {
            client,
            signed_in_at,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Whether the session is young enough to reuse at `now`.
    pub fn is_fresh(&self, now: Instant, signin_interval: Duration) -> bool {
        now.saturating_duration_since(self.signed_in_at) <= signin_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_fresh_until_interval_elapses() {
        let start = Instant::now();
        let session = Session::new(Client::new(), start);
        let interval = Duration::from_secs(60);

        assert!(session.is_fresh(start, interval));
        assert!(session.is_fresh(start + interval, interval));
        assert!(!session.is_fresh(start + interval + Duration::from_secs(1), interval));
    }
}
