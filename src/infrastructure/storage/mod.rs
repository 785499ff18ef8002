use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::{collections::BTreeMap, sync::Arc};

/// Schemaless side store living next to the relational tables.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn put(&self, key: &str, value: Value) -> anyhow::Result<()>;
    async fn get(&self, key: &str) -> anyhow::Result<Option<Value>>;
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
    /// Keys starting with `prefix`, sorted.
    async fn keys(&self, prefix: &str) -> anyhow::Result<Vec<String>>;
}

pub fn build_kv_store() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryKeyValueStore::default())
}

#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn put(&self, key: &str, value: Value) -> anyhow::Result<()> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> anyhow::Result<Vec<String>> {
        Ok(self
            .entries
            .read()
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }
}
