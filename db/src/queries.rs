use crate::structs::Message;
use rusqlite::{Connection, OptionalExtension, Result, Row};

#[inline(always)]
pub fn get_version(conn: &Connection) -> Result<u32> {
    conn.query_row("SELECT user_version FROM pragma_user_version;", [], |row| {
        row.get(0)
    })
}

#[inline(always)]
pub fn set_version(conn: &Connection, version: u32) -> Result<()> {
    conn.pragma_update(None, "user_version", version)
}

/// Column list shared by every query that builds a `Message`, in the order
/// `message_from_row` reads them.
pub const MESSAGE_COLUMNS: &str = "id, timestamp, content, content_type, avatar_url, client,
    sender_email, sender_full_name, sender_id, stream_id, subject";

#[inline(always)]
pub fn message_from_row(row: &Row<'_>) -> Result<Message> {
    Ok(Message {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        content: row.get(2)?,
        content_type: row.get(3)?,
        avatar_url: row.get(4)?,
        client: row.get(5)?,
        sender_email: row.get(6)?,
        sender_full_name: row.get(7)?,
        sender_id: row.get(8)?,
        stream_id: row.get(9)?,
        subject: row.get(10)?,
    })
}

#[inline(always)]
pub fn get_message(conn: &Connection, msg_id: u64) -> Result<Option<Message>> {
    conn.query_row(
        &format!("SELECT {MESSAGE_COLUMNS} FROM message WHERE id=(?1)"),
        [msg_id],
        message_from_row,
    )
    .optional()
}
