mod migrations;
mod queries;
mod read_only_db;
pub mod structs;
mod writeable_db;

pub use read_only_db::ReadOnlyDb;
pub use writeable_db::WriteableDb;

use rusqlite::{Connection, Result};
use std::path::Path;

pub(crate) mod connections {
    use rusqlite::{Connection, Params, Result};

    pub trait GetConnectionImmutable {
        fn get_connection(&self) -> &Connection;

        #[inline(always)]
        fn execute<P: Params>(&self, sql: &str, params: P) -> Result<usize> {
            self.get_connection().execute(sql, params)
        }
    }
}

/// Result of a single-row insert. A row rejected by the primary key or a
/// unique index is reported as `AlreadyExists` rather than as an error, so
/// re-running an archive over a populated store is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyExists,
}

impl InsertOutcome {
    #[inline(always)]
    pub(crate) const fn from_count(count: usize) -> InsertOutcome {
        if count > 0 {
            InsertOutcome::Inserted
        } else {
            InsertOutcome::AlreadyExists
        }
    }

    #[inline(always)]
    pub const fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

pub struct WriteableConn {
    conn: Connection,
}

impl connections::GetConnectionImmutable for WriteableConn {
    #[inline]
    fn get_connection(&self) -> &Connection {
        &self.conn
    }
}

impl ReadOnlyDb for WriteableConn {}

impl WriteableDb for WriteableConn {}

impl WriteableConn {
    /// Opens (creating if needed) the archive at `path` and brings its schema
    /// up to date.
    #[inline]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<WriteableConn> {
        let mut conn = Connection::open(path)?;
        migrations::migrate(&mut conn)?;
        Ok(WriteableConn { conn })
    }

    /// A fresh, migrated in-memory store. Nothing written survives the
    /// connection.
    #[inline]
    pub fn open_in_memory() -> Result<WriteableConn> {
        let mut conn = Connection::open_in_memory()?;
        migrations::migrate(&mut conn)?;
        Ok(WriteableConn { conn })
    }
}
