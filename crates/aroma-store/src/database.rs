//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`], guarantees that
//! migrations are run before any other operation, and serves as the
//! process-wide [`Session`].
//!
//! TTL is emulated with the `expires_at` column present on every table: an
//! insert with a TTL stamps `now + ttl`, and every select skips rows whose
//! stamp has passed.  Expired rows are never polled for; they are overwritten
//! by the next upsert of the same key or removed by an explicit delete.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

use crate::clock::Clock;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::migrations;
use crate::session::{ResultSet, Row, Session};
use crate::statements::{Condition, Delete, Insert, Projection, Select, Statement};
use crate::tables::{COUNT, EXPIRES_AT};

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Mutex<Connection>,
    clock: Arc<dyn Clock>,
}

impl Database {
    /// Open the database named by the configuration.
    pub fn open(config: &StoreConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        if config.is_in_memory() {
            return Self::open_in_memory(clock);
        }

        tracing::info!(path = %config.database_path, "opening database");

        let conn = Connection::open(&config.database_path)?;
        let journal_mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::debug!(journal_mode = %journal_mode, "journal mode set");

        Self::from_connection(conn, config.busy_timeout, clock)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: &Path, clock: Arc<dyn Clock>) -> Result<Self> {
        let config = StoreConfig {
            database_path: path.display().to_string(),
            ..StoreConfig::default()
        };
        Self::open(&config, clock)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory(clock: Arc<dyn Clock>) -> Result<Self> {
        tracing::info!("opening in-memory database");
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, StoreConfig::default().busy_timeout, clock)
    }

    fn from_connection(
        conn: Connection,
        busy_timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        conn.busy_timeout(busy_timeout)?;

        migrations::run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            clock,
        })
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn
            .lock()
            .path()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    /// The clock used to stamp and filter TTLs.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}

impl Session for Database {
    fn execute(&self, statement: &Statement) -> Result<ResultSet> {
        let now = self.clock.now_millis();
        let mut conn = self.conn.lock();

        match statement {
            Statement::Select(select) => run_select(&conn, select, now),
            Statement::Batch(batch) => {
                let tx = conn.transaction()?;
                for statement in &batch.statements {
                    apply_mutation(&tx, statement, now)?;
                }
                tx.commit()?;
                Ok(ResultSet::empty())
            }
            mutation => {
                apply_mutation(&conn, mutation, now)?;
                Ok(ResultSet::empty())
            }
        }
    }
}

fn quote(identifier: &str) -> String {
    format!("\"{identifier}\"")
}

/// Render `a = ?1 AND b = ?2`, pushing the bound values.
fn render_conditions(conditions: &[Condition], params: &mut Vec<Value>) -> Vec<String> {
    conditions
        .iter()
        .map(|condition| {
            params.push(condition.value.clone());
            format!("{} = ?{}", quote(condition.column), params.len())
        })
        .collect()
}

fn run_select(conn: &Connection, select: &Select, now: i64) -> Result<ResultSet> {
    let mut params = Vec::new();
    let mut clauses = render_conditions(&select.conditions, &mut params);

    params.push(Value::Integer(now));
    clauses.push(format!(
        "({col} IS NULL OR {col} > ?{n})",
        col = quote(EXPIRES_AT),
        n = params.len()
    ));

    let columns = match select.projection {
        Projection::All => "*".to_string(),
        Projection::Count => format!("COUNT(*) AS {}", quote(COUNT)),
    };

    let mut sql = format!(
        "SELECT {columns} FROM {} WHERE {}",
        quote(select.table),
        clauses.join(" AND ")
    );
    if let Some(column) = select.order_by_desc {
        sql.push_str(&format!(" ORDER BY {} DESC", quote(column)));
    }
    if let Some(limit) = select.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    let mut stmt = conn.prepare(&sql)?;
    let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        let mut mapped = Row::new();
        for (index, name) in names.iter().enumerate() {
            mapped.insert(name, row.get::<_, Value>(index)?);
        }
        Ok(mapped)
    })?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row?);
    }
    Ok(ResultSet::new(result))
}

fn apply_mutation(conn: &Connection, statement: &Statement, now: i64) -> Result<()> {
    match statement {
        Statement::Insert(insert) => run_insert(conn, insert, now),
        Statement::Delete(delete) => run_delete(conn, delete),
        Statement::Batch(batch) => {
            for statement in &batch.statements {
                apply_mutation(conn, statement, now)?;
            }
            Ok(())
        }
        Statement::Select(select) => Err(StoreError::OperationFailed(format!(
            "select on {} is not allowed inside a batch",
            select.table
        ))),
    }
}

fn run_insert(conn: &Connection, insert: &Insert, now: i64) -> Result<()> {
    if insert.values.is_empty() {
        return Err(StoreError::OperationFailed(format!(
            "insert into {} has no values",
            insert.table
        )));
    }

    let expires_at = match insert.ttl {
        Some(ttl) => Value::Integer(now.saturating_add(ttl.millis())),
        None => Value::Null,
    };

    let mut columns: Vec<String> = insert.values.iter().map(|(c, _)| quote(c)).collect();
    columns.push(quote(EXPIRES_AT));

    let mut params: Vec<Value> = insert.values.iter().map(|(_, v)| v.clone()).collect();
    params.push(expires_at);

    let placeholders: Vec<String> = (1..=params.len()).map(|n| format!("?{n}")).collect();

    let sql = format!(
        "INSERT OR REPLACE INTO {} ({}) VALUES ({})",
        quote(insert.table),
        columns.join(", "),
        placeholders.join(", ")
    );
    conn.execute(&sql, params_from_iter(params.iter()))?;
    Ok(())
}

fn run_delete(conn: &Connection, delete: &Delete) -> Result<()> {
    if delete.conditions.is_empty() {
        return Err(StoreError::OperationFailed(format!(
            "refusing unconditional delete from {}",
            delete.table
        )));
    }

    let mut params = Vec::new();
    let clauses = render_conditions(&delete.conditions, &mut params);
    let sql = format!(
        "DELETE FROM {} WHERE {}",
        quote(delete.table),
        clauses.join(" AND ")
    );
    conn.execute(&sql, params_from_iter(params.iter()))?;
    Ok(())
}
