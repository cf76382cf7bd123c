use log::{debug, warn};
use std::path::PathBuf;
use std::time::Duration;

use crate::{
    api::FrameClient,
    config::ClientConfig,
    credentials::{Credentials, DEFAULT_CREDENTIALS_FILE},
    runtime::Runtime,
};

/// Overrides collected from the command line. `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub base_url: Option<String>,
    pub credentials_file: Option<PathBuf>,
    pub max_favorites: Option<usize>,
    pub request_interval_ms: Option<u64>,
    pub retry_delay_ms: Option<u64>,
    pub retries: Option<u32>,
}

impl Options {
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(max) = self.max_favorites {
            config.max_favorites = max;
        }
        if let Some(ms) = self.request_interval_ms {
            config.min_request_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = self.retry_delay_ms {
            config.initial_retry_delay = Duration::from_millis(ms);
        }
        if let Some(retries) = self.retries {
            config.max_retries = retries;
        }
        config
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.credentials_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_FILE))
    }
}

/// Resolve credentials and build a client. Sign-in happens on first use.
pub fn build_client<R: Runtime>(runtime: R, options: &Options) -> FrameClient<R> {
    let config = options.client_config();
    let credentials = Credentials::resolve(&runtime, &options.credentials_file());

    if credentials.is_complete() {
        debug!("Using credentials for {}", credentials.username);
    } else {
        warn!("Credentials are incomplete; requests will fail to sign in");
    }
    debug!("Client config: {:?}", config);

    FrameClient::new(runtime, config, credentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{PASSWORD_ENV_VAR, USER_ENV_VAR};
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    #[test]
    fn test_default_options_keep_defaults() {
        let options = Options::default();
        assert_eq!(options.client_config(), ClientConfig::default());
        assert_eq!(options.credentials_file(), PathBuf::from(".credentials"));
    }

    #[test]
    fn test_options_override_config() {
        let options = Options {
            base_url: Some("http://localhost:3000".to_string()),
            max_favorites: Some(10),
            request_interval_ms: Some(0),
            retry_delay_ms: Some(100),
            retries: Some(1),
            ..Options::default()
        };

        let config = options.client_config();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.max_favorites, 10);
        assert_eq!(config.min_request_interval, Duration::ZERO);
        assert_eq!(config.initial_retry_delay, Duration::from_millis(100));
        assert_eq!(config.max_retries, 1);
    }

    #[test]
    fn test_build_client_reads_given_credentials_file() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq(USER_ENV_VAR))
            .returning(|_| Err(std::env::VarError::NotPresent));
        runtime
            .expect_env_var()
            .with(eq(PASSWORD_ENV_VAR))
            .returning(|_| Err(std::env::VarError::NotPresent));
        runtime
            .expect_read_to_string()
            .with(eq(PathBuf::from("/etc/eoctl/credentials")))
            .times(1)
            .returning(|_| Ok("me@example.com\nsecret\n".to_string()));

        let options = Options {
            credentials_file: Some(PathBuf::from("/etc/eoctl/credentials")),
            ..Options::default()
        };
        let client = build_client(runtime, &options);

        assert!(!client.session().is_signed_in());
        assert_eq!(client.session().config(), &ClientConfig::default());
    }
}
