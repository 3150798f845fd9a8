use crate::config::Config;
use crate::errors::{Error, Result};
use crate::remote::Remote;
use crate::throttle::Throttle;

use db::structs::Message;
use log::trace;
use serde::Serialize;

const MESSAGES_ENDPOINT: &str = "/api/v1/messages";

#[derive(Serialize)]
struct NarrowTerm<'a> {
    negated: bool,
    operator: &'a str,
    operand: &'a str,
}

/// JSON narrow restricting results to exactly one channel and topic.
fn narrow(channel: &str, topic: &str) -> Result<String> {
    Ok(serde_json::to_string(&[
        NarrowTerm {
            negated: false,
            operator: "stream",
            operand: channel,
        },
        NarrowTerm {
            negated: false,
            operator: "topic",
            operand: topic,
        },
    ])?)
}

/// Walks the messages of one (channel, topic) pair from the beginning, one
/// page per `next_page` call.
///
/// Only an empty page ends the walk, so a final page that is exactly full
/// costs one more round-trip. Once the end is reached, or a request fails,
/// the pager stays finished and issues no further requests.
pub struct MessagePager<'a, R: Remote + ?Sized> {
    remote: &'a R,
    narrow: String,
    anchor: u64,
    page_size: u32,
    throttle: Throttle,
    finished: bool,
}

impl<'a, R: Remote + ?Sized> MessagePager<'a, R> {
    pub fn new(remote: &'a R, config: &Config, channel: &str, topic: &str) -> Result<Self> {
        Ok(MessagePager {
            remote,
            narrow: narrow(channel, topic)?,
            anchor: 0,
            page_size: config.page_size,
            throttle: Throttle::new(config.page_delay),
            finished: false,
        })
    }

    /// The anchor the next request will use.
    #[inline]
    pub const fn anchor(&self) -> u64 {
        self.anchor
    }

    pub async fn next_page(&mut self) -> Result<Option<Vec<Message>>> {
        if self.finished {
            return Ok(None);
        }
        self.throttle.between().await;

        let query = [
            ("anchor", self.anchor.to_string()),
            ("num_before", String::from("0")),
            ("num_after", self.page_size.to_string()),
            ("narrow", self.narrow.clone()),
        ];
        trace!("requesting messages from anchor {}", self.anchor);
        let messages = match self.remote.get_api(MESSAGES_ENDPOINT, &query).await {
            Ok(response) => response.messages,
            Err(why) => {
                self.finished = true;
                return Err(why);
            }
        };

        let last_id = match messages.last() {
            Some(last) => last.id,
            None => {
                self.finished = true;
                return Ok(None);
            }
        };
        if last_id < self.anchor {
            self.finished = true;
            return Err(Error::Internal(format!(
                "page ending at message {last_id} does not advance past anchor {}",
                self.anchor
            )));
        }
        self.anchor = last_id + 1;
        Ok(Some(messages))
    }
}
