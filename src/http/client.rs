//! Session-aware HTTP client with throttling and retry/backoff.

use log::{debug, warn};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::request::ApiRequest;
use super::retry::{AttemptFailure, RetryPolicy, is_retryable_status};
use super::session::Session;
use super::throttle::RequestThrottle;
use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::runtime::Runtime;

/// Runs API requests through the authenticated pipeline.
///
/// Every public method degrades to an empty result on failure after logging
/// it: callers never see an error.
pub struct SessionClient<R: Runtime> {
    pub(super) runtime: R,
    pub(super) config: ClientConfig,
    pub(super) credentials: Credentials,
    pub(super) throttle: RequestThrottle,
    session: Option<Session>,
}

impl<R: Runtime> SessionClient<R> {
    /// Credentials are kept; sign-in is deferred to the first request.
    pub fn new(runtime: R, config: ClientConfig, credentials: Credentials) -> Self {
        let throttle = RequestThrottle::new(config.min_request_interval);
        Self {
            runtime,
            config,
            credentials,
            throttle,
            session: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Forget the current session; the next request signs in again.
    pub fn invalidate_session(&mut self) {
        self.session = None;
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.config.max_retries,
            initial_delay: self.config.initial_retry_delay,
        }
    }

    /// Make sure a session exists and is younger than the sign-in interval.
    /// Returns false when signing in failed.
    async fn ensure_signed_in(&mut self) -> bool {
        let now = self.runtime.now();
        if let Some(session) = &self.session {
            if session.is_fresh(now, self.config.signin_interval) {
                return true;
            }
            debug!("Session older than {:?}, signing in again", self.config.signin_interval);
        }

        self.session = None;
        match self.sign_in().await {
            Ok(session) => {
                self.session = Some(session);
                true
            }
            Err(e) => {
                warn!("Unable to sign in: {:#}", e);
                false
            }
        }
    }

    /// Issue `request`, retrying transport failures and 5xx responses with
    /// exponential backoff. Responses below 500 are returned as they are.
    /// Returns `None` when not signed in or when all attempts failed.
    #[tracing::instrument(skip(self))]
    pub async fn request(&mut self, request: &ApiRequest) -> Option<Response> {
        if !self.ensure_signed_in().await {
            return None;
        }
        let client = self.session.as_ref()?.client().clone();
        let url = self.config.api_url(&request.full_path());
        let policy = self.retry_policy();

        debug!("{} {}...", request.method, url);

        for retry in 0..=policy.max_retries {
            match self.send_once(&client, &url, request).await {
                Ok(response) => {
                    if response.status() == StatusCode::UNAUTHORIZED {
                        warn!("{} {}: unauthorized, session dropped", request.method, url);
                        self.invalidate_session();
                    }
                    return Some(response);
                }
                Err(failure) => {
                    warn!("{} {}: {}", request.method, url, failure);
                    if retry == policy.max_retries {
                        break;
                    }
                    let delay = policy.delay_before_retry(retry);
                    warn!(
                        "Failed request {} of {}. Retrying in {:?}...",
                        retry + 1,
                        policy.max_attempts(),
                        delay
                    );
                    self.runtime.sleep(delay).await;
                }
            }
        }

        warn!(
            "Maximum HTTP request attempts ({}) exceeded for {} {}",
            policy.max_attempts(),
            request.method,
            url
        );
        None
    }

    /// Like [`request`](Self::request), decoding a 200 response body as JSON.
    /// Any failure (no response, other status, bad JSON) yields `T::default()`.
    pub async fn request_json<T>(&mut self, request: &ApiRequest) -> T
    where
        T: DeserializeOwned + Default,
    {
        let Some(response) = self.request(request).await else {
            return T::default();
        };

        if response.status() != StatusCode::OK {
            warn!(
                "Unexpected response for {} {}: {}",
                request.method,
                request.full_path(),
                response.status()
            );
            return T::default();
        }

        match response.json::<T>().await {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    "Unable to parse JSON from {} {}: {}",
                    request.method,
                    request.full_path(),
                    e
                );
                T::default()
            }
        }
    }

    /// Single throttled attempt without retry.
    async fn send_once(
        &mut self,
        client: &Client,
        url: &str,
        request: &ApiRequest,
    ) -> Result<Response, AttemptFailure> {
        self.throttle.wait(&self.runtime).await;

        let mut builder = client.request(request.method.clone(), url);
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }

        let response = builder.send().await.map_err(AttemptFailure::Transport)?;
        if is_retryable_status(response.status()) {
            return Err(AttemptFailure::ServerError(response.status()));
        }
        Ok(response)
    }
}
