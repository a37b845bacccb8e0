//! Table resource and its in-memory item store.

use crate::config::{validate_table, TableConfig};
use crate::error::DeclareResult;
use crate::registry::Registry;
use crate::resources::Resource;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Items keyed by the JSON text of their partition-key value, so `"1"` and `1` stay distinct.
#[derive(Debug, Default)]
struct ItemStore {
    order: Vec<String>,
    items: HashMap<String, Value>,
}

impl ItemStore {
    fn insert(&mut self, key: String, item: Value) {
        if self.items.insert(key.clone(), item).is_none() {
            self.order.push(key);
        }
    }

    fn remove(&mut self, key: &str) {
        if self.items.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }
}

#[derive(Debug)]
struct TableInner {
    config: TableConfig,
    store: RwLock<ItemStore>,
}

#[derive(Clone, Debug)]
pub struct Table {
    inner: Arc<TableInner>,
}

fn store_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl Table {
    /// Validate and register. The returned handle and the registry entry are the same table.
    pub fn declare(registry: &mut Registry, config: TableConfig) -> DeclareResult<Table> {
        validate_table(&config)?;
        let table = Table {
            inner: Arc::new(TableInner {
                config,
                store: RwLock::new(ItemStore::default()),
            }),
        };
        registry.put_resource(Resource::Table(table.clone()))?;
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    pub fn partition_key(&self) -> &str {
        &self.inner.config.partition_key
    }

    pub fn config(&self) -> &TableConfig {
        &self.inner.config
    }

    pub fn same_as(&self, other: &Table) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn get(&self, key: impl Into<Value>) -> Option<Value> {
        let key = store_key(&key.into())?;
        self.inner.store.read().items.get(&key).cloned()
    }

    /// Insert or replace by partition key. Items that do not serialize to an object
    /// carrying the partition key are skipped; returns whether the item was stored.
    pub fn put<T: Serialize>(&self, item: &T) -> bool {
        let item = match serde_json::to_value(item) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(table = %self.name(), error = %e, "put skipped: item not serializable");
                return false;
            }
        };
        let Some(key) = item.get(self.partition_key()).and_then(store_key) else {
            tracing::debug!(table = %self.name(), partition_key = %self.partition_key(), "put skipped: no partition key");
            return false;
        };
        self.inner.store.write().insert(key, item);
        true
    }

    /// All items in first-insertion order.
    pub fn scan(&self) -> Vec<Value> {
        let store = self.inner.store.read();
        store
            .order
            .iter()
            .filter_map(|k| store.items.get(k).cloned())
            .collect()
    }

    /// Merge fields when both stored item and `data` are objects, otherwise replace.
    /// No-op for an absent key.
    ///
    /// The item stays stored under `key` even if `data` changes its partition-key
    /// field; use `delete` then `put` to move an item to a new key.
    pub fn update(&self, key: impl Into<Value>, data: Value) {
        let Some(key) = store_key(&key.into()) else {
            return;
        };
        let mut store = self.inner.store.write();
        let Some(existing) = store.items.get_mut(&key) else {
            return;
        };
        match (existing, data) {
            (Value::Object(current), Value::Object(patch)) => current.extend(patch),
            (existing, data) => *existing = data,
        }
    }

    pub fn delete(&self, key: impl Into<Value>) {
        if let Some(key) = store_key(&key.into()) {
            self.inner.store.write().remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.store.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
