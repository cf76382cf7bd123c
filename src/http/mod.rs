//! Authenticated HTTP pipeline: form sign-in, session reuse, request
//! throttling and retry with exponential backoff.

mod client;
mod request;
mod retry;
mod session;
mod signin;
mod throttle;

pub use client::SessionClient;
pub use request::ApiRequest;
pub use retry::{
    AttemptFailure, DEFAULT_INITIAL_RETRY_DELAY_MS, DEFAULT_MAX_RETRIES, RetryPolicy,
    is_retryable_status,
};
pub use session::{DEFAULT_SIGNIN_INTERVAL_SECS, Session};
pub use signin::{AUTHENTICITY_TOKEN_FIELD, SIGN_IN_PAGE, SignInError, extract_authenticity_token};
pub use throttle::{DEFAULT_MIN_REQUEST_INTERVAL_MS, RequestThrottle};
