use crate::connections::GetConnectionImmutable;
use crate::structs::{Channel, File, Message};
use crate::{InsertOutcome, ReadOnlyDb};

use log::{debug, trace};
use rusqlite::Result;

/// Single-row inserts. Each statement commits on its own; nothing here opens
/// a transaction spanning several records.
pub trait WriteableDb: ReadOnlyDb {
    #[inline]
    fn create_channel(&self, channel: &Channel) -> Result<InsertOutcome> {
        let mut stmt = self.get_connection().prepare_cached(
            "INSERT INTO channel (id, name, description) VALUES ( ?1, ?2, ?3 )
            ON CONFLICT(id) DO NOTHING",
        )?;

        let outcome =
            InsertOutcome::from_count(stmt.execute((channel.id, &channel.name, &channel.description))?);
        if outcome.is_inserted() {
            debug!("Added channel_id {} with name {} to db", channel.id, channel.name);
        }
        Ok(outcome)
    }

    #[inline]
    fn create_message(&self, message: &Message) -> Result<InsertOutcome> {
        let mut stmt = self.get_connection().prepare_cached(
            "INSERT INTO message (
                id, timestamp, content, content_type, avatar_url, client,
                sender_email, sender_full_name, sender_id, stream_id, subject
            )
            VALUES ( ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11 )
            ON CONFLICT(id) DO NOTHING",
        )?;

        let count = stmt.execute((
            message.id,
            message.timestamp,
            &message.content,
            &message.content_type,
            &message.avatar_url,
            &message.client,
            &message.sender_email,
            &message.sender_full_name,
            message.sender_id,
            message.stream_id,
            &message.subject,
        ))?;

        let outcome = InsertOutcome::from_count(count);
        if !outcome.is_inserted() {
            trace!("message {} already stored", message.id);
        }
        Ok(outcome)
    }

    #[inline]
    fn create_file(&self, file: &File) -> Result<InsertOutcome> {
        let count = self.execute(
            "INSERT INTO file (path, content_type, size, data)
            VALUES ( ?1, ?2, ?3, ?4 )
            ON CONFLICT(path) DO NOTHING",
            (&file.path, &file.content_type, file.size, &file.data),
        )?;

        Ok(InsertOutcome::from_count(count))
    }
}
