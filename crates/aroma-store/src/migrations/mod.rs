//! Schema bootstrap.
//!
//! Migrations are executed in order every time a
//! [`Database`](crate::database::Database) is opened.  Each migration is
//! guarded by the `user_version` pragma so it runs exactly once.

pub mod v001_initial;

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Current schema version.  Bump this and add a new migration module whenever
/// the schema changes.
pub const CURRENT_VERSION: u32 = 1;

/// Run all pending migrations against the open connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!(
        current_version = current,
        target_version = CURRENT_VERSION,
        "checking database migrations"
    );

    if current > CURRENT_VERSION {
        return Err(StoreError::OperationFailed(format!(
            "database schema version {current} is newer than supported version {CURRENT_VERSION}"
        )));
    }

    if current < 1 {
        tracing::info!("applying migration v001_initial");
        v001_initial::up(conn)
            .map_err(|e| StoreError::OperationFailed(format!("migration v001_initial: {e}")))?;
        conn.pragma_update(None, "user_version", 1)?;
    }

    Ok(())
}
