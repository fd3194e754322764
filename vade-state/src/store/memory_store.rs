use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory backend: the test substitute, and the fallback when durable
/// storage is unavailable.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, serde_json::Value>>>,
}

impl MemoryStore {
    pub fn get(&self, key: &str) -> anyhow::Result<Option<serde_json::Value>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("session store lock poisoned"))?;

        Ok(entries.get(key).cloned())
    }

    pub fn set(&self, key: &str, value: serde_json::Value) -> anyhow::Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("session store lock poisoned"))?;

        entries.insert(key.to_owned(), value);
        Ok(())
    }

    pub fn del(&self, key: &str) -> anyhow::Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("session store lock poisoned"))?;

        entries.remove(key);
        Ok(())
    }
}
