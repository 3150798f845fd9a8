use super::{ApiResponse, Download, Remote};
use crate::config::Config;
use crate::errors::{Error, Result};
use crate::retry::with_retry;

use async_trait::async_trait;
use log::trace;
use reqwest::header::CONTENT_TYPE;
use url::Url;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// HTTP transport for the remote service. Every request carries basic auth
/// when it targets the origin of the base url and is bounded by the
/// configured timeout.
pub struct Client {
    http: reqwest::Client,
    base: Url,
    config: Config,
}

impl Client {
    pub fn new(config: Config) -> Result<Client> {
        let base = Url::parse(&config.base_url())?;
        Client::with_base(config, base)
    }

    /// Resolves every path against `base` instead of `https://{host}/`.
    pub fn with_base(config: Config, base: Url) -> Result<Client> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Client { http, base, config })
    }

    #[inline]
    fn resolve(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        trace!("GET {url}");
        let mut request = self.http.get(url.clone());
        // credentials never leave the configured origin
        if url.origin() == self.base.origin() {
            request = request.basic_auth(&self.config.email, Some(&self.config.api_key));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status, url.path().to_string()));
        }
        Ok(response)
    }

    async fn fetch_api(&self, url: Url) -> Result<ApiResponse> {
        let bytes = self.get(url).await?.bytes().await?;
        let response: ApiResponse = serde_json::from_slice(&bytes)?;
        if response.result == "error" {
            return Err(Error::Internal(format!(
                "remote service returned an error: {}",
                response.msg
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl Remote for Client {
    async fn get_api(&self, endpoint: &str, query: &[(&str, String)]) -> Result<ApiResponse> {
        let mut url = self.resolve(endpoint)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        with_retry(&self.config.retry, endpoint, || self.fetch_api(url.clone())).await
    }

    async fn get_file(&self, path: &str) -> Result<Download> {
        let response = self.get(self.resolve(path)?).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let data = response.bytes().await?.to_vec();

        Ok(Download { content_type, data })
    }
}
