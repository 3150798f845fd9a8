use super::queries;
use log::{info, trace};

use rusqlite::{Connection, Result};

macro_rules! migration {
    ( $n:literal, $( $x:literal ),* ) => {
        paste::item! {
            fn [< migration_$n >] (conn: &Connection) -> Result<()> {
                trace!("running migration {}", $n);

                $(
                    conn.execute($x, [])?;
                )*
                queries::set_version(conn, $n)?;
                trace!("finished migration {}", $n);
                Ok(())
            }
        }
    };
}

migration![
    1,
    "CREATE TABLE channel (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL
    );",
    "CREATE TABLE message (
        id INTEGER PRIMARY KEY,
        timestamp NUMERIC NOT NULL,
        content TEXT NOT NULL,
        content_type TEXT NOT NULL,
        avatar_url TEXT DEFAULT NULL,
        client TEXT NOT NULL,
        sender_email TEXT NOT NULL,
        sender_full_name TEXT NOT NULL,
        sender_id INTEGER NOT NULL,
        stream_id INTEGER NOT NULL,
        subject TEXT NOT NULL
    );",
    // path is the natural key, the rowid only keeps blobs out of the index
    "CREATE TABLE file (
        id INTEGER PRIMARY KEY,
        path TEXT NOT NULL UNIQUE,
        content_type TEXT NOT NULL,
        size INTEGER NOT NULL,
        data BLOB NOT NULL
    );",
    "CREATE INDEX idx_message_topic ON message (stream_id, subject);",
    "CREATE INDEX idx_message_avatar ON message (avatar_url);"
];

pub fn migrate(conn: &mut Connection) -> Result<()> {
    // be sure to increment this everytime a new migration is added
    const FINAL_VER: u32 = 1;

    let ver = queries::get_version(conn)?;
    info!("database version is currently: {ver} with target ver {FINAL_VER}");
    if ver == FINAL_VER {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        return Ok(());
    }
    if ver > FINAL_VER {
        return Err(rusqlite::Error::InvalidParameterName(format!(
            "database version {ver} is newer than supported version {FINAL_VER}"
        )));
    }
    trace!("disabling foreign keys pre-migration");
    conn.pragma_update(None, "foreign_keys", "OFF")?;

    let tx = conn.transaction()?;

    trace!("starting migration transaction");

    if ver < 1 {
        migration_1(&tx)?;
    }

    trace!("commiting migration transaction");
    tx.commit()?;
    trace!("successfully commited migration transaction");

    conn.pragma_update(None, "foreign_keys", "ON")?;
    trace!("enabling foreign keys post-migration");
    info!("migration successful");
    Ok(())
}
