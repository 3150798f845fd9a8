use crate::errors::{Error, Result};

use std::time::Duration;

/// Messages requested per page.
pub const PAGE_SIZE: u32 = 500;
/// Stored messages read per batch when scanning for embedded files.
pub const SCAN_BATCH_SIZE: u64 = 10;

const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);
const DEFAULT_FILE_DELAY: Duration = Duration::from_millis(200);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt; 0 disables retrying.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

/// Everything the engine needs to talk to the remote service. Built once at
/// startup and handed to each component.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub email: String,
    pub api_key: String,
    pub page_size: u32,
    pub page_delay: Duration,
    pub file_delay: Duration,
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl Config {
    pub fn new(host: &str, email: &str, api_key: &str) -> Result<Config> {
        let host = host.trim();
        if host.is_empty() {
            return Err(Error::Config(String::from("host must not be empty")));
        }
        if host.contains("://") || host.contains('/') {
            return Err(Error::Config(format!(
                "host {host:?} should be a bare host name, without scheme or path"
            )));
        }
        if email.trim().is_empty() {
            return Err(Error::Config(String::from("email must not be empty")));
        }
        if api_key.trim().is_empty() {
            return Err(Error::Config(String::from(
                "missing api key, pass it as an argument or set API_KEY",
            )));
        }

        Ok(Config {
            host: host.to_string(),
            email: email.trim().to_string(),
            api_key: api_key.trim().to_string(),
            page_size: PAGE_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
            file_delay: DEFAULT_FILE_DELAY,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
        })
    }

    /// Base url every resource path is resolved against.
    #[inline]
    pub fn base_url(&self) -> String {
        format!("https://{}/", self.host)
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    let mut config = Config::new("chat.example.com", "bot@example.com", "secret").unwrap();
    config.page_delay = Duration::ZERO;
    config.file_delay = Duration::ZERO;
    config.retry.max_retries = 0;
    config
}
