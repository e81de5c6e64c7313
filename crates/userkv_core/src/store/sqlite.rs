//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Persist logical tables and items in a local SQLite file.
//! - Keep SQL details behind the `KeyValueStore` port.
//!
//! # Invariants
//! - Logical tables are registered in `kv_tables` before items land.
//! - Items are stored as attribute-tagged JSON, one row per partition key.
//! - Puts are upserts; the previous item for the key is replaced wholesale.

use super::context::RequestContext;
use super::item::Item;
use super::{partition_key_value, KeyValueStore, PutItemInput, StoreError, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// `KeyValueStore` backend over one SQLite connection.
pub struct SqliteKeyValueStore {
    conn: Mutex<Connection>,
}

impl SqliteKeyValueStore {
    /// Wraps an already migrated connection (see `db::open_db`).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Opens the database file at `path`, migrating it if needed.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Registers `table` with the given partition key attribute.
    ///
    /// Idempotent when the table already uses the same key.
    pub fn ensure_table(&self, table: &str, partition_key: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        match table_partition_key(&conn, table)? {
            Some(existing) if existing == partition_key => Ok(()),
            Some(existing) => Err(StoreError::TableSchemaMismatch {
                table: table.to_string(),
                existing,
                requested: partition_key.to_string(),
            }),
            None => {
                conn.execute(
                    "INSERT INTO kv_tables (name, partition_key) VALUES (?1, ?2);",
                    params![table, partition_key],
                )?;
                Ok(())
            }
        }
    }

    /// Returns the stored item for `key`, if any.
    pub fn get_item(&self, table: &str, key: &str) -> StoreResult<Option<Item>> {
        let conn = self.lock()?;
        if table_partition_key(&conn, table)?.is_none() {
            return Err(StoreError::TableNotFound(table.to_string()));
        }

        let json: Option<String> = conn
            .query_row(
                "SELECT item_json FROM kv_items WHERE table_name = ?1 AND key_value = ?2;",
                params![table, key],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn item_count(&self, table: &str) -> StoreResult<usize> {
        let conn = self.lock()?;
        if table_partition_key(&conn, table)?.is_none() {
            return Err(StoreError::TableNotFound(table.to_string()));
        }

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM kv_items WHERE table_name = ?1;",
            [table],
            |row| row.get(0),
        )?;
        usize::try_from(count)
            .map_err(|_| StoreError::Unavailable(format!("invalid item count `{count}`")))
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("sqlite connection lock poisoned".to_string()))
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn put_item(&self, ctx: &RequestContext, input: PutItemInput) -> StoreResult<()> {
        let started_at = Instant::now();
        ctx.check()?;

        let conn = self.lock()?;
        // Lock acquisition may have waited past the caller's deadline.
        ctx.check()?;

        let partition_key = table_partition_key(&conn, &input.table_name)?
            .ok_or_else(|| StoreError::TableNotFound(input.table_name.clone()))?;
        let key = partition_key_value(&input.table_name, &partition_key, &input.item)?;
        let json = serde_json::to_string(&input.item)?;

        let result = conn.execute(
            "INSERT INTO kv_items (table_name, key_value, item_json)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (table_name, key_value) DO UPDATE SET
                item_json = excluded.item_json,
                written_at = strftime('%s', 'now');",
            params![input.table_name, key, json],
        );

        match result {
            Ok(_) => {
                debug!(
                    "event=kv_put module=store backend=sqlite status=ok table={} duration_ms={}",
                    input.table_name,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=kv_put module=store backend=sqlite status=error table={} duration_ms={} error={}",
                    input.table_name,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }
}

fn table_partition_key(conn: &Connection, table: &str) -> StoreResult<Option<String>> {
    let key = conn
        .query_row(
            "SELECT partition_key FROM kv_tables WHERE name = ?1;",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(key)
}
