//! Form-based sign-in.
//!
//! The service has no token API: the sign-in page carries a hidden
//! `authenticity_token` input that must be posted back together with the
//! credentials. The session lives in the cookies of the client used.

use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};

use super::client::SessionClient;
use super::session::Session;
use crate::config::ClientConfig;
use crate::runtime::Runtime;

/// Sign-in page, relative to the site root.
pub const SIGN_IN_PAGE: &str = "sign_in";

/// Name of the hidden anti-forgery input on the sign-in form.
pub const AUTHENTICITY_TOKEN_FIELD: &str = "authenticity_token";

const USER_AGENT: &str = concat!("eoctl/", env!("EOCTL_VERSION"));

/// Reasons a sign-in attempt did not produce a session.
#[derive(Debug)]
pub enum SignInError {
    /// Username or password is empty.
    MissingCredentials,
    /// The sign-in page did not load (non-2xx).
    PageUnavailable(StatusCode),
    /// The sign-in page had no usable authenticity token.
    MissingToken,
    /// The form was posted but the service did not accept it (non-2xx).
    Rejected(StatusCode),
}

impl std::fmt::Display for SignInError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignInError::MissingCredentials => write!(
                f,
                "No credentials. Set EO_USER and EO_PASS or write a credentials file."
            ),
            SignInError::PageUnavailable(status) => {
                write!(f, "Unable to load sign-in page: HTTP {}", status.as_u16())
            }
            SignInError::MissingToken => {
                write!(f, "Sign-in page has no {}", AUTHENTICITY_TOKEN_FIELD)
            }
            SignInError::Rejected(status) => {
                write!(f, "Sign-in rejected: HTTP {}", status.as_u16())
            }
        }
    }
}

impl std::error::Error for SignInError {}

/// Pull the first non-empty `authenticity_token` input value out of an HTML page.
pub fn extract_authenticity_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!(r#"input[name="{}"]"#, AUTHENTICITY_TOKEN_FIELD)).ok()?;

    document
        .select(&selector)
        .find_map(|input| input.value().attr("value"))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// A fresh client with its own cookie jar, so every sign-in starts clean.
pub(super) fn build_http_client(config: &ClientConfig) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .cookie_store(true)
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")
}

impl<R: Runtime> SessionClient<R> {
    /// Fetch the sign-in form, scrape its token and post the credentials.
    #[tracing::instrument(skip(self))]
    pub(super) async fn sign_in(&mut self) -> Result<Session> {
        if !self.credentials.is_complete() {
            return Err(SignInError::MissingCredentials.into());
        }

        let client = build_http_client(&self.config)?;
        let url = self.config.site_url(SIGN_IN_PAGE);

        debug!("Fetching sign-in page {}...", url);
        self.throttle.wait(&self.runtime).await;
        let page = client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch sign-in page")?;
        if !page.status().is_success() {
            return Err(SignInError::PageUnavailable(page.status()).into());
        }
        let body = page.text().await.context("Failed to read sign-in page")?;
        let token = extract_authenticity_token(&body).ok_or(SignInError::MissingToken)?;

        let form = [
            ("user[email]", self.credentials.username.as_str()),
            ("user[password]", self.credentials.password.as_str()),
            (AUTHENTICITY_TOKEN_FIELD, token.as_str()),
        ];

        debug!("Submitting sign-in form for {}...", self.credentials.username);
        self.throttle.wait(&self.runtime).await;
        let response = client
            .post(&url)
            .form(&form)
            .send()
            .await
            .context("Failed to submit sign-in form")?;
        if !response.status().is_success() {
            return Err(SignInError::Rejected(response.status()).into());
        }

        info!("Signed in as {}", self.credentials.username);
        Ok(Session::new(client, self.runtime.now()))
    }
}
