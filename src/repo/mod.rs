//! # Record Store
//!
//! Durable local storage for every record kind, backed by SQLite. One
//! generic repository serves all kinds; each kind describes itself
//! through [StoreRecord] and the store derives its SQL from that.

pub mod sqlite;
pub mod sqlite_queries;

use derive_more::{Display, Error};
use sqlx::sqlite::{SqliteArguments, SqliteRow};

/// (child table, foreign-key column) removed when a parent row is
/// deleted. Evaluated sequentially; cascades are best-effort, not
/// transactional with the parent delete.
pub type CascadeRule = (&'static str, &'static str);

#[derive(Debug, Display, Error)]
pub enum StoreError {
    #[display("{table} row '{id}' already exists")]
    DuplicateKey { table: &'static str, id: String },
    #[display("{table} row '{id}' not found")]
    NotFound { table: &'static str, id: String },
    #[display("{table} has no index on '{column}'")]
    UnknownIndex { table: &'static str, column: String },
    #[display("store failure: {_0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

pub type SqliteQuery<'q> = sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>>;

/// Storage contract for a record kind.
///
/// `COLUMNS` lists every column with the primary key first, in the exact
/// order [StoreRecord::bind_columns] binds values; the store builds its
/// insert/update/select statements from that list.
pub trait StoreRecord:
    for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Sync + Unpin
{
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    /// Columns the store answers equality lookups on without a scan.
    const INDEXED: &'static [&'static str];
    /// Child rows removed when a row of this kind is deleted.
    const CASCADES: &'static [CascadeRule] = &[];

    type Patch: Send;

    fn id(&self) -> &str;

    /// Merges a partial update into this record. Fields absent from the
    /// patch keep their stored value.
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Binds every column value in `COLUMNS` order.
    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}
