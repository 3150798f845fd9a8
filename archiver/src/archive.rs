use crate::catalog;
use crate::config::Config;
use crate::errors::Result;
use crate::pager::MessagePager;
use crate::remote::Remote;

use db::structs::Message;
use db::{InsertOutcome, WriteableDb};
use log::{error, info};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DataSummary {
    pub channels: u64,
    pub topics: u64,
    pub pages: u64,
    pub messages_stored: u64,
    pub messages_existing: u64,
}

/// Stores one page, record by record. Returns how many messages were new.
fn store_page(db: &impl WriteableDb, page: &[Message]) -> Result<u64> {
    let mut stored = 0;
    for message in page {
        match db.create_message(message) {
            Ok(InsertOutcome::Inserted) => stored += 1,
            Ok(InsertOutcome::AlreadyExists) => (),
            Err(why) => {
                error!("Failed to store message {}: {why}", message.id);
                return Err(why.into());
            }
        }
    }
    Ok(stored)
}

/// Archives every channel and every message of every topic. Channels and
/// topics are drained strictly one after another, starting each topic from
/// the first message; anything already stored is left untouched.
pub async fn archive_data<D, R>(db: &D, remote: &R, config: &Config) -> Result<DataSummary>
where
    D: WriteableDb,
    R: Remote + ?Sized,
{
    let mut summary = DataSummary::default();

    let channels = catalog::list_channels(remote).await?;
    info!("Found {} channels", channels.len());

    for channel in &channels {
        if let Err(why) = db.create_channel(channel) {
            error!("Failed to store channel {} ({}): {why}", channel.name, channel.id);
            return Err(why.into());
        }
        summary.channels += 1;

        info!("Processing channel {}", channel.name);
        let topics = catalog::list_topics(remote, channel.id).await?;
        for topic in &topics {
            summary.topics += 1;
            info!(
                "Getting messages for '{}: {}' (newest id {})",
                channel.name, topic.name, topic.max_id
            );

            let mut pager = MessagePager::new(remote, config, &channel.name, &topic.name)?;
            while let Some(page) = pager.next_page().await? {
                let stored = store_page(db, &page)?;
                summary.pages += 1;
                summary.messages_stored += stored;
                summary.messages_existing += page.len() as u64 - stored;
                info!(" - fetched {} messages ({stored} new)", page.len());
            }
        }
    }

    Ok(summary)
}
