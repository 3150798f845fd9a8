mod client;
#[cfg(test)]
pub(crate) mod fake;

pub use client::Client;

use crate::errors::Result;

use async_trait::async_trait;
use db::structs::{Channel, Message};
use serde::Deserialize;

/// The JSON envelope every API endpoint answers with. Only the list relevant
/// to the endpoint is populated.
#[derive(Debug, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub streams: Vec<Channel>,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// A topic is only a traversal key; it is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Topic {
    pub name: String,
    pub max_id: u64,
}

#[derive(Debug)]
pub struct Download {
    pub content_type: String,
    pub data: Vec<u8>,
}

#[async_trait]
pub trait Remote {
    /// GET an API endpoint with the given query and decode the envelope.
    async fn get_api(&self, endpoint: &str, query: &[(&str, String)]) -> Result<ApiResponse>;

    /// GET a raw resource. `path` is either host relative or an absolute url.
    async fn get_file(&self, path: &str) -> Result<Download>;
}
