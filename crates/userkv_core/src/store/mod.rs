//! Key-value table store port and backends.
//!
//! # Responsibility
//! - Define the one write operation core consumes from a table store.
//! - Provide in-memory and SQLite backends behind that port.
//!
//! # Invariants
//! - `put_item` is an unconditional create-or-replace keyed by the table's
//!   partition key; no existence checks, no concurrency tokens.
//! - Backends check the request context before touching storage.

use crate::db::DbError;
use std::sync::Arc;
use thiserror::Error;

pub mod context;
pub mod item;
pub mod memory;
pub mod sqlite;

use context::{ContextError, RequestContext};
use item::{AttributeValue, Item};

/// Partition key attribute used when callers do not choose one.
pub const DEFAULT_PARTITION_KEY: &str = "id";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure for a single call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request was cancelled before the write")]
    Cancelled,
    #[error("request deadline exceeded before the write")]
    DeadlineExceeded,
    #[error("table not found: {0}")]
    TableNotFound(String),
    #[error("table `{table}` already exists with partition key `{existing}`, not `{requested}`")]
    TableSchemaMismatch {
        table: String,
        existing: String,
        requested: String,
    },
    #[error("item for table `{table}` is missing partition key `{key}`")]
    MissingPartitionKey { table: String, key: String },
    #[error("partition key `{key}` for table `{table}` must be a non-empty string")]
    InvalidPartitionKey { table: String, key: String },
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid item json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<ContextError> for StoreError {
    fn from(value: ContextError) -> Self {
        match value {
            ContextError::Cancelled => Self::Cancelled,
            ContextError::DeadlineExceeded => Self::DeadlineExceeded,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Request for one put into a named table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutItemInput {
    pub table_name: String,
    pub item: Item,
}

/// Narrow write port over a key-value table store.
pub trait KeyValueStore: Send + Sync {
    /// Writes `input.item` into `input.table_name`, replacing any item with
    /// the same partition key.
    fn put_item(&self, ctx: &RequestContext, input: PutItemInput) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn put_item(&self, ctx: &RequestContext, input: PutItemInput) -> StoreResult<()> {
        (**self).put_item(ctx, input)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn put_item(&self, ctx: &RequestContext, input: PutItemInput) -> StoreResult<()> {
        (**self).put_item(ctx, input)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn put_item(&self, ctx: &RequestContext, input: PutItemInput) -> StoreResult<()> {
        (**self).put_item(ctx, input)
    }
}

/// Extracts the string partition key value from an item.
pub(crate) fn partition_key_value<'a>(
    table: &str,
    key: &str,
    item: &'a Item,
) -> StoreResult<&'a str> {
    match item.get(key) {
        None => Err(StoreError::MissingPartitionKey {
            table: table.to_string(),
            key: key.to_string(),
        }),
        Some(AttributeValue::S(value)) if !value.is_empty() => Ok(value),
        Some(_) => Err(StoreError::InvalidPartitionKey {
            table: table.to_string(),
            key: key.to_string(),
        }),
    }
}
