use crate::errors::Result;
use crate::remote::{Remote, Topic};

use db::structs::Channel;
use log::debug;

const STREAMS_ENDPOINT: &str = "/api/v1/streams";

/// Every channel visible to the account, in one call.
pub async fn list_channels<R: Remote + ?Sized>(remote: &R) -> Result<Vec<Channel>> {
    let response = remote.get_api(STREAMS_ENDPOINT, &[]).await?;
    Ok(response.streams)
}

/// Every topic of one channel, in one call.
pub async fn list_topics<R: Remote + ?Sized>(remote: &R, channel_id: u64) -> Result<Vec<Topic>> {
    let endpoint = format!("/api/v1/users/me/{channel_id}/topics");
    let response = remote.get_api(&endpoint, &[]).await?;
    debug!("channel {channel_id} has {} topics", response.topics.len());
    Ok(response.topics)
}
