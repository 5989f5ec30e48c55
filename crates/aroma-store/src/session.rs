//! The store session consumed by every repository.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use rusqlite::types::Value;
use serde::de::DeserializeOwned;

use crate::error::{Result, StoreError};
use crate::statements::Statement;
use crate::tables::COUNT;

/// Executes statements against the backing store.
///
/// One session is created at startup and shared by every repository as an
/// `Arc<dyn Session>`.
#[cfg_attr(test, mockall::automock)]
pub trait Session: Send + Sync {
    fn execute(&self, statement: &Statement) -> Result<ResultSet>;
}

/// A single result row: column name to value.
///
/// Accessors never fail; a missing, NULL or mistyped column reads as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: Value) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: Value) {
        self.columns.insert(column.to_string(), value);
    }

    /// The raw value, with NULL reported as absent.
    pub fn get(&self, column: &str) -> Option<&Value> {
        match self.columns.get(column) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    pub fn text(&self, column: &str) -> Option<String> {
        match self.get(column)? {
            Value::Text(text) => Some(text.clone()),
            _ => None,
        }
    }

    pub fn integer(&self, column: &str) -> Option<i64> {
        match self.get(column)? {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Epoch milliseconds.
    pub fn timestamp(&self, column: &str) -> Option<i64> {
        self.integer(column)
    }

    pub fn blob(&self, column: &str) -> Option<Vec<u8>> {
        match self.get(column)? {
            Value::Blob(bytes) => Some(bytes.clone()),
            _ => None,
        }
    }

    /// An enum stored by name; an unknown name reads as absent.
    pub fn enum_value<T: FromStr>(&self, column: &str) -> Option<T> {
        self.text(column)?.parse().ok()
    }

    /// A JSON array of text; NULL or undecodable reads as the empty set.
    pub fn text_set(&self, column: &str) -> BTreeSet<String> {
        self.text(column)
            .and_then(|json| serde_json::from_str::<Vec<String>>(&json).ok())
            .map(|values| values.into_iter().collect())
            .unwrap_or_default()
    }

    /// A set of enum names; unknown names are dropped.
    pub fn enum_set<T: FromStr + Ord>(&self, column: &str) -> BTreeSet<T> {
        self.text_set(column)
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect()
    }

    /// A JSON payload column.
    pub fn json<T: DeserializeOwned>(&self, column: &str) -> Option<Result<T>> {
        self.text(column)
            .map(|json| serde_json::from_str(&json).map_err(StoreError::from))
    }
}

/// Rows returned by a statement, in store order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The result of a `COUNT(*)` select.
    pub fn with_count(count: i64) -> Self {
        Self::new(vec![Row::new().with(COUNT, Value::Integer(count))])
    }

    pub fn one(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Value of the `count` column of the first row, zero when absent.
    pub fn count(&self) -> i64 {
        self.one().and_then(|row| row.integer(COUNT)).unwrap_or(0)
    }
}

/// Execute a statement, logging and converting any store failure.
///
/// `describe` names the operation and the entity id for the log line.
pub(crate) fn execute<F>(
    session: &dyn Session,
    statement: &Statement,
    describe: F,
) -> Result<ResultSet>
where
    F: FnOnce() -> String,
{
    session.execute(statement).map_err(|err| {
        let action = describe();
        let message = match err {
            StoreError::OperationFailed(message) => message,
            other => other.to_string(),
        };
        tracing::error!(action = %action, error = %message, "store operation failed");
        StoreError::OperationFailed(format!("failed to {action}: {message}"))
    })
}
