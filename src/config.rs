//! Client tunables.

use std::time::Duration;

use crate::api::{DEFAULT_FAVORITES_PAGE_SIZE, DEFAULT_MAX_FAVORITES};
use crate::http::{
    DEFAULT_INITIAL_RETRY_DELAY_MS, DEFAULT_MAX_RETRIES, DEFAULT_MIN_REQUEST_INTERVAL_MS,
    DEFAULT_SIGNIN_INTERVAL_SECS,
};

/// Default service root.
pub const DEFAULT_BASE_URL: &str = "https://www.electricobjects.com/";

/// Versioned API prefix appended to the base URL.
pub const DEFAULT_API_VERSION_PATH: &str = "api/v2/";

/// HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_version_path: String,
    /// Sign in again once the session is older than this.
    pub signin_interval: Duration,
    /// Minimum spacing between consecutive network calls.
    pub min_request_interval: Duration,
    /// Retries after the first attempt, so at most `max_retries + 1` calls.
    pub max_retries: u32,
    /// Delay before the first retry; doubled before each further retry.
    pub initial_retry_delay: Duration,
    pub favorites_page_size: usize,
    pub max_favorites: usize,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version_path: DEFAULT_API_VERSION_PATH.to_string(),
            signin_interval: Duration::from_secs(DEFAULT_SIGNIN_INTERVAL_SECS),
            min_request_interval: Duration::from_millis(DEFAULT_MIN_REQUEST_INTERVAL_MS),
            max_retries: DEFAULT_MAX_RETRIES,
            initial_retry_delay: Duration::from_millis(DEFAULT_INITIAL_RETRY_DELAY_MS),
            favorites_page_size: DEFAULT_FAVORITES_PAGE_SIZE,
            max_favorites: DEFAULT_MAX_FAVORITES,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Base URL without trailing slashes, ready to have paths joined onto it.
    pub fn site_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Absolute URL of a page on the site (not under the API prefix).
    pub fn site_url(&self, page: &str) -> String {
        format!("{}/{}", self.site_root(), page.trim_start_matches('/'))
    }

    /// Absolute URL of an API path such as `user/devices/`.
    pub fn api_url(&self, path: &str) -> String {
        let version = self.api_version_path.trim_matches('/');
        format!(
            "{}/{}/{}",
            self.site_root(),
            version,
            path.trim_start_matches('/')
        )
    }
}
