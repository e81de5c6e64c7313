//! Process-local key-value store.
//!
//! Holds tables in a mutex-guarded map. Contents are lost when the store is
//! dropped; intended for tests and embedding without a database file.

use super::context::RequestContext;
use super::item::Item;
use super::{partition_key_value, KeyValueStore, PutItemInput, StoreError, StoreResult};
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct MemoryTable {
    partition_key: String,
    items: BTreeMap<String, Item>,
}

/// In-memory `KeyValueStore` backend.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    tables: Mutex<HashMap<String, MemoryTable>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `table` with the given partition key attribute.
    ///
    /// Idempotent when the table already uses the same key.
    pub fn ensure_table(&self, table: &str, partition_key: &str) -> StoreResult<()> {
        let mut tables = self.lock()?;
        if let Some(existing) = tables.get(table) {
            if existing.partition_key != partition_key {
                return Err(StoreError::TableSchemaMismatch {
                    table: table.to_string(),
                    existing: existing.partition_key.clone(),
                    requested: partition_key.to_string(),
                });
            }
            return Ok(());
        }

        tables.insert(
            table.to_string(),
            MemoryTable {
                partition_key: partition_key.to_string(),
                items: BTreeMap::new(),
            },
        );
        Ok(())
    }

    /// Returns a copy of the stored item, if any.
    pub fn get_item(&self, table: &str, key: &str) -> StoreResult<Option<Item>> {
        let tables = self.lock()?;
        let table_state = tables
            .get(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        Ok(table_state.items.get(key).cloned())
    }

    pub fn item_count(&self, table: &str) -> StoreResult<usize> {
        let tables = self.lock()?;
        tables
            .get(table)
            .map(|table_state| table_state.items.len())
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<String, MemoryTable>>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory table lock poisoned".to_string()))
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn put_item(&self, ctx: &RequestContext, input: PutItemInput) -> StoreResult<()> {
        ctx.check()?;

        let mut tables = self.lock()?;
        let table_state = tables
            .get_mut(&input.table_name)
            .ok_or_else(|| StoreError::TableNotFound(input.table_name.clone()))?;
        let key = partition_key_value(&input.table_name, &table_state.partition_key, &input.item)?
            .to_string();

        let replaced = table_state.items.insert(key, input.item).is_some();
        debug!(
            "event=kv_put module=store backend=memory status=ok table={} replaced={}",
            input.table_name, replaced
        );
        Ok(())
    }
}
