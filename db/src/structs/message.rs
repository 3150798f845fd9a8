use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    // ids are assigned by the remote service and never reused
    pub id: u64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,

    pub content: String,
    #[serde(default)]
    pub content_type: String,

    // null when the sender uses the default avatar
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub client: String,
    pub sender_email: String,
    pub sender_full_name: String,
    pub sender_id: u64,

    #[serde(default)]
    pub stream_id: u64,
    // the topic the message was posted under
    #[serde(default)]
    pub subject: String,
}

impl Ord for Message {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for Message {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Message {}
