//! Test utilities
//!
//! Available under `cfg(test)` or the `testing` feature.

use crate::store::{ContentStore, Query, StoreError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory [`ContentStore`] for tests.
///
/// Entities are kept per content type. `find_many` applies the query's
/// locale, equality filters, and limit; `find_one` matches on the `id`
/// field; `create` assigns a fresh id. Population and sorting are no-ops,
/// matching how this layer treats them: opaque.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entities: Mutex<HashMap<String, Vec<Value>>>,
    next_id: Mutex<u64>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, assigning an id when none is present. Returns the
    /// stored entity.
    pub fn insert(&self, content_type: &str, mut entity: Value) -> Value {
        if entity.get("id").is_none() {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            entity["id"] = json!(*next_id);
        }
        let mut entities = self.entities.lock().unwrap();
        entities
            .entry(content_type.to_string())
            .or_default()
            .push(entity.clone());
        entity
    }

    /// Number of stored entities for a content type.
    pub fn count(&self, content_type: &str) -> usize {
        self.entities
            .lock()
            .unwrap()
            .get(content_type)
            .map_or(0, Vec::len)
    }

    fn matches(entity: &Value, query: &Query) -> bool {
        if let Some(locale) = &query.locale {
            if entity.get("locale").and_then(Value::as_str) != Some(locale.as_str()) {
                return false;
            }
        }
        query
            .filters
            .iter()
            .all(|(field, expected)| entity.get(field) == Some(expected))
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn find_many(&self, content_type: &str, query: &Query) -> Result<Vec<Value>, StoreError> {
        let entities = self.entities.lock().unwrap();
        let mut found: Vec<Value> = entities
            .get(content_type)
            .map(|list| {
                list.iter()
                    .filter(|e| Self::matches(e, query))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if let Some(limit) = query.limit {
            found.truncate(limit as usize);
        }
        Ok(found)
    }

    async fn find_one(
        &self,
        content_type: &str,
        id: u64,
        _query: &Query,
    ) -> Result<Option<Value>, StoreError> {
        let entities = self.entities.lock().unwrap();
        Ok(entities
            .get(content_type)
            .and_then(|list| {
                list.iter()
                    .find(|e| e.get("id").and_then(Value::as_u64) == Some(id))
            })
            .cloned())
    }

    async fn create(&self, content_type: &str, mut data: Value) -> Result<Value, StoreError> {
        {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            data["id"] = json!(*next_id);
        }
        let mut entities = self.entities.lock().unwrap();
        entities
            .entry(content_type.to_string())
            .or_default()
            .push(data.clone());
        Ok(data)
    }
}
