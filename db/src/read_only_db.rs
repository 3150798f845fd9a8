use crate::connections::GetConnectionImmutable;
use crate::queries::{self, message_from_row, MESSAGE_COLUMNS};
use crate::structs::{Channel, File, Message};

use rusqlite::{OptionalExtension, Result};

pub trait ReadOnlyDb: GetConnectionImmutable {
    #[inline]
    fn get_message(&self, message_id: u64) -> Result<Option<Message>> {
        queries::get_message(self.get_connection(), message_id)
    }

    #[inline]
    fn get_channel(&self, channel_id: u64) -> Result<Option<Channel>> {
        self.get_connection()
            .query_row(
                "SELECT id, name, description FROM channel WHERE id=(?1)",
                [channel_id],
                |row| {
                    Ok(Channel {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                    })
                },
            )
            .optional()
    }

    #[inline]
    fn get_file(&self, path: &str) -> Result<Option<File>> {
        self.get_connection()
            .query_row(
                "SELECT path, content_type, size, data FROM file WHERE path=(?1)",
                [path],
                |row| {
                    Ok(File {
                        path: row.get(0)?,
                        content_type: row.get(1)?,
                        size: row.get(2)?,
                        data: row.get(3)?,
                    })
                },
            )
            .optional()
    }

    /// Cheap existence probe, never loads the blob.
    #[inline]
    fn file_exists(&self, path: &str) -> Result<bool> {
        self.get_connection().query_row(
            "SELECT EXISTS (SELECT 1 FROM file WHERE path=(?1))",
            [path],
            |row| row.get(0),
        )
    }

    /// Every distinct, non-empty sender avatar url across stored messages.
    #[inline]
    fn distinct_avatar_urls(&self) -> Result<Vec<String>> {
        let mut stmt = self.get_connection().prepare(
            "SELECT DISTINCT avatar_url FROM message
            WHERE avatar_url IS NOT NULL AND avatar_url != ''
            ORDER BY avatar_url",
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut avatars = Vec::new();
        for row in rows {
            avatars.push(row?)
        }
        Ok(avatars)
    }

    /// One batch of stored messages. Ordered by id so that consecutive
    /// offsets walk the table without overlap.
    #[inline]
    fn messages_page(&self, offset: u64, limit: u64) -> Result<Vec<Message>> {
        let mut stmt = self.get_connection().prepare_cached(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM message ORDER BY id LIMIT (?1) OFFSET (?2)"
        ))?;
        let rows = stmt.query_map([limit, offset], message_from_row)?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?)
        }
        Ok(messages)
    }

    #[inline]
    fn count_messages(&self) -> Result<u64> {
        self.get_connection()
            .query_row("SELECT COUNT(*) FROM message", [], |row| row.get(0))
    }

    #[inline]
    fn count_files(&self) -> Result<u64> {
        self.get_connection()
            .query_row("SELECT COUNT(*) FROM file", [], |row| row.get(0))
    }
}
