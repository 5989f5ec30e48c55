//! Store statements and the per-entity builders that emit them.
//!
//! A statement is plain data; [`Database`](crate::database::Database) renders
//! it to SQL.  Builders hold no state: each is a free function from validated
//! request values to a [`Statement`].

pub mod activity;
pub mod applications;
pub mod credentials;
pub mod followers;
pub mod inbox;
pub mod media;
pub mod messages;
pub mod organizations;
pub mod preferences;
pub mod reactions;
pub mod tokens;
pub mod users;

use aroma_shared::LengthOfTime;
use rusqlite::types::Value;

use crate::assertions;
use crate::error::Result;

/// Time-to-live of an inserted row, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ttl {
    seconds: i64,
}

impl Ttl {
    /// Rejects zero, negative and overflowing lifetimes.
    pub fn from_lifetime(lifetime: &LengthOfTime) -> Result<Self> {
        let seconds = assertions::valid_lifetime(lifetime)?;
        Ok(Self { seconds })
    }

    pub fn from_seconds(seconds: i64) -> Result<Self> {
        Self::from_lifetime(&LengthOfTime::seconds(seconds))
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn millis(&self) -> i64 {
        self.seconds.saturating_mul(1000)
    }
}

/// `column = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: &'static str,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// `SELECT *`
    All,
    /// `SELECT COUNT(*) AS count`
    Count,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: &'static str,
    pub projection: Projection,
    pub conditions: Vec<Condition>,
    /// Descending sort column.
    pub order_by_desc: Option<&'static str>,
    pub limit: Option<usize>,
}

impl Select {
    pub fn all(table: &'static str) -> Self {
        Self {
            table,
            projection: Projection::All,
            conditions: Vec::new(),
            order_by_desc: None,
            limit: None,
        }
    }

    pub fn count(table: &'static str) -> Self {
        Self {
            projection: Projection::Count,
            ..Self::all(table)
        }
    }

    pub fn where_eq(mut self, column: &'static str, value: Value) -> Self {
        self.conditions.push(Condition { column, value });
        self
    }

    pub fn order_by_desc(mut self, column: &'static str) -> Self {
        self.order_by_desc = Some(column);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// An upsert: an existing row with the same primary key is replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: &'static str,
    pub values: Vec<(&'static str, Value)>,
    pub ttl: Option<Ttl>,
}

impl Insert {
    pub fn into_table(table: &'static str) -> Self {
        Self {
            table,
            values: Vec::new(),
            ttl: None,
        }
    }

    pub fn value(mut self, column: &'static str, value: Value) -> Self {
        self.values.push((column, value));
        self
    }

    pub fn values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Value)>,
    {
        self.values.extend(values);
        self
    }

    pub fn using_ttl(mut self, ttl: Ttl) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// The value written to `column`, if any.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }
}

/// Conditions naming only a partition key delete the whole partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: &'static str,
    pub conditions: Vec<Condition>,
}

impl Delete {
    pub fn from_table(table: &'static str) -> Self {
        Self {
            table,
            conditions: Vec::new(),
        }
    }

    pub fn where_eq(mut self, column: &'static str, value: Value) -> Self {
        self.conditions.push(Condition { column, value });
        self
    }
}

/// Mutations committed atomically, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    pub statements: Vec<Statement>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, statement: impl Into<Statement>) -> Self {
        self.push(statement);
        self
    }

    pub fn push(&mut self, statement: impl Into<Statement>) {
        self.statements.push(statement.into());
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Delete(Delete),
    Batch(Batch),
}

impl Statement {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Statement::Select(_))
    }

    /// Table touched by a single statement; `None` for batches.
    pub fn table(&self) -> Option<&'static str> {
        match self {
            Statement::Select(s) => Some(s.table),
            Statement::Insert(i) => Some(i.table),
            Statement::Delete(d) => Some(d.table),
            Statement::Batch(_) => None,
        }
    }
}

impl From<Select> for Statement {
    fn from(select: Select) -> Self {
        Statement::Select(select)
    }
}

impl From<Insert> for Statement {
    fn from(insert: Insert) -> Self {
        Statement::Insert(insert)
    }
}

impl From<Delete> for Statement {
    fn from(delete: Delete) -> Self {
        Statement::Delete(delete)
    }
}

impl From<Batch> for Statement {
    fn from(batch: Batch) -> Self {
        Statement::Batch(batch)
    }
}
