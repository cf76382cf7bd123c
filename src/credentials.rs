//! Sign-in credential resolution.
//!
//! Sources are applied in order, each overriding the fields it provides:
//! built-in defaults (empty), then the `EO_USER` / `EO_PASS` environment
//! variables, then a two-line credentials file (username, then password).

use log::debug;
use std::fmt;
use std::path::Path;

use crate::runtime::Runtime;

/// Default credentials file, relative to the working directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = ".credentials";

pub const USER_ENV_VAR: &str = "EO_USER";
pub const PASSWORD_ENV_VAR: &str = "EO_PASS";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Resolve credentials from the environment and `credentials_file`.
    ///
    /// A missing or unreadable file is ignored. A file with a single line
    /// only overrides the username.
    pub fn resolve<R: Runtime>(runtime: &R, credentials_file: &Path) -> Self {
        let mut credentials = Self::default();

        if let Ok(username) = runtime.env_var(USER_ENV_VAR) {
            credentials.username = username;
        }
        if let Ok(password) = runtime.env_var(PASSWORD_ENV_VAR) {
            credentials.password = password;
        }

        match runtime.read_to_string(credentials_file) {
            Ok(contents) => {
                let mut lines = contents.lines();
                if let Some(username) = lines.next() {
                    credentials.username = username.trim().to_string();
                }
                if let Some(password) = lines.next() {
                    credentials.password = password.trim().to_string();
                }
            }
            Err(e) => debug!("No credentials file used: {:#}", e),
        }

        credentials
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"*********")
            .finish()
    }
}
