//! In-memory stand-in for the remote service. Serves channels, topics,
//! paged messages and files from maps, and records every request it sees.

use super::{ApiResponse, Download, Remote, Topic};
use crate::errors::{Error, Result};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use db::structs::{Channel, Message};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Api(String, Vec<(String, String)>),
    File(String),
}

pub fn message(id: u64, stream_id: u64, subject: &str) -> Message {
    Message {
        id,
        timestamp: Utc.timestamp_opt(1_600_000_000 + id as i64, 0).unwrap(),
        content: format!("<p>message {id}</p>"),
        content_type: String::from("text/html"),
        avatar_url: None,
        client: String::from("website"),
        sender_email: String::from("someone@example.com"),
        sender_full_name: String::from("Some One"),
        sender_id: 7,
        stream_id,
        subject: subject.to_string(),
    }
}

#[derive(Default)]
pub struct FakeRemote {
    channels: Vec<Channel>,
    topics: HashMap<u64, Vec<Topic>>,
    messages: HashMap<(String, String), Vec<Message>>,
    files: HashMap<String, (String, Vec<u8>)>,
    requests: Mutex<Vec<Request>>,
}

fn query_value<'q>(query: &'q [(&str, String)], key: &str) -> Option<&'q str> {
    query
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.as_str())
}

impl FakeRemote {
    pub fn new() -> FakeRemote {
        FakeRemote::default()
    }

    pub fn with_channel(mut self, id: u64, name: &str, topics: &[&str]) -> Self {
        self.channels.push(Channel {
            id,
            name: name.to_string(),
            description: format!("about {name}"),
        });
        let topics = topics
            .iter()
            .map(|topic| {
                self.messages
                    .entry((name.to_string(), topic.to_string()))
                    .or_default();
                Topic {
                    name: topic.to_string(),
                    max_id: 0,
                }
            })
            .collect();
        self.topics.insert(id, topics);
        self
    }

    /// Listing topics of `channel_id` will fail.
    pub fn without_topics(mut self, channel_id: u64) -> Self {
        self.topics.remove(&channel_id);
        self
    }

    pub fn with_message(mut self, channel: &str, message: Message) -> Self {
        let key = (channel.to_string(), message.subject.clone());
        let messages = self.messages.entry(key).or_default();
        messages.push(message);
        messages.sort();
        self
    }

    pub fn with_messages<I>(mut self, channel_id: u64, channel: &str, topic: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        for id in ids {
            self = self.with_message(channel, message(id, channel_id, topic));
        }
        self
    }

    pub fn with_message_ids(self, channel_id: u64, channel: &str, topic: &str, ids: &[u64]) -> Self {
        self.with_messages(channel_id, channel, topic, ids.iter().copied())
    }

    pub fn with_file(mut self, path: &str, content_type: &str, data: &[u8]) -> Self {
        self.files
            .insert(path.to_string(), (content_type.to_string(), data.to_vec()));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Query of every message request, in order.
    pub fn message_queries(&self) -> Vec<HashMap<String, String>> {
        self.requests()
            .into_iter()
            .filter_map(|request| match request {
                Request::Api(endpoint, query) if endpoint == "/api/v1/messages" => {
                    Some(query.into_iter().collect())
                }
                _ => None,
            })
            .collect()
    }

    pub fn message_anchors(&self) -> Vec<u64> {
        self.message_queries()
            .iter()
            .map(|query| query["anchor"].parse().unwrap())
            .collect()
    }

    /// (channel, topic) of every message request that started from anchor 0.
    pub fn traversals(&self) -> Vec<(String, String)> {
        self.message_queries()
            .iter()
            .filter(|query| query["anchor"] == "0")
            .map(|query| {
                let narrow: serde_json::Value = serde_json::from_str(&query["narrow"]).unwrap();
                (
                    narrow[0]["operand"].as_str().unwrap().to_string(),
                    narrow[1]["operand"].as_str().unwrap().to_string(),
                )
            })
            .collect()
    }

    pub fn file_requests(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|request| match request {
                Request::File(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    fn messages_page(&self, query: &[(&str, String)]) -> Result<ApiResponse> {
        let anchor: u64 = query_value(query, "anchor").unwrap().parse().unwrap();
        let num_after: usize = query_value(query, "num_after").unwrap().parse().unwrap();
        let narrow: serde_json::Value =
            serde_json::from_str(query_value(query, "narrow").unwrap())?;
        let key = (
            narrow[0]["operand"].as_str().unwrap_or_default().to_string(),
            narrow[1]["operand"].as_str().unwrap_or_default().to_string(),
        );

        match self.messages.get(&key) {
            Some(messages) => Ok(ApiResponse {
                result: String::from("success"),
                messages: messages
                    .iter()
                    .filter(|m| m.id >= anchor)
                    .take(num_after)
                    .cloned()
                    .collect(),
                ..Default::default()
            }),
            None => Err(Error::Status(
                StatusCode::BAD_REQUEST,
                String::from("/api/v1/messages"),
            )),
        }
    }
}

#[async_trait]
impl Remote for FakeRemote {
    async fn get_api(&self, endpoint: &str, query: &[(&str, String)]) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(Request::Api(
            endpoint.to_string(),
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ));

        if endpoint == "/api/v1/streams" {
            return Ok(ApiResponse {
                result: String::from("success"),
                streams: self.channels.clone(),
                ..Default::default()
            });
        }
        if endpoint == "/api/v1/messages" {
            return self.messages_page(query);
        }
        let topics = endpoint
            .strip_prefix("/api/v1/users/me/")
            .and_then(|rest| rest.strip_suffix("/topics"))
            .and_then(|id| id.parse::<u64>().ok())
            .and_then(|id| self.topics.get(&id));
        match topics {
            Some(topics) => Ok(ApiResponse {
                result: String::from("success"),
                topics: topics.clone(),
                ..Default::default()
            }),
            None => Err(Error::Status(StatusCode::NOT_FOUND, endpoint.to_string())),
        }
    }

    async fn get_file(&self, path: &str) -> Result<Download> {
        self.requests
            .lock()
            .unwrap()
            .push(Request::File(path.to_string()));

        match self.files.get(path) {
            Some((content_type, data)) => Ok(Download {
                content_type: content_type.clone(),
                data: data.clone(),
            }),
            None => Err(Error::Status(StatusCode::NOT_FOUND, path.to_string())),
        }
    }
}
