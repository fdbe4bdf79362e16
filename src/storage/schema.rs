//! Schema definition and connection pragmas.
//!
//! Three tables linked by foreign keys:
//!
//! ```text
//! agencies (id) <- agents (agency_id) <- properties (agent_id)
//! ```
//!
//! Initialization is idempotent: reopening an existing database neither
//! fails nor duplicates tables.

use std::time::Duration;

use rusqlite::Connection;

/// Apply per-connection pragmas.
///
/// SQLite does not enforce declared foreign keys unless `foreign_keys` is
/// switched on for the connection, so this must run before any writes.
pub fn apply_pragmas(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(Duration::from_secs(5))
}

/// Create the three registry tables if they do not already exist.
pub fn initialize_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS agencies (
            id      INTEGER PRIMARY KEY,
            name    TEXT NOT NULL,
            address TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS agents (
            id        INTEGER PRIMARY KEY,
            name      TEXT NOT NULL,
            email     TEXT NOT NULL,
            agency_id INTEGER NOT NULL,
            FOREIGN KEY (agency_id) REFERENCES agencies (id)
        );

        CREATE TABLE IF NOT EXISTS properties (
            id       INTEGER PRIMARY KEY,
            address  TEXT NOT NULL,
            price    REAL NOT NULL,
            status   TEXT NOT NULL,
            agent_id INTEGER NOT NULL,
            FOREIGN KEY (agent_id) REFERENCES agents (id)
        );
        "#,
    )
}
