mod file_store;
mod keys;
mod memory_store;

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use file_store::FileStore;
pub use keys::SessionKey;
use memory_store::MemoryStore;

#[derive(Clone, Debug)]
enum StoreBackend {
    Memory(MemoryStore),
    File(FileStore),
}

/// Namespaced key-value wrapper over durable local storage.
///
/// The store is a cache, never authoritative: whatever it holds is
/// superseded wholesale by the remote profile once a fetch succeeds. Reads
/// that fail (missing file, corrupt JSON, wrong shape) degrade to `None` —
/// the logged-out default — instead of surfacing an error.
#[derive(Clone, Debug)]
pub struct SessionStore {
    key_prefix: String,
    backend: StoreBackend,
}

impl SessionStore {
    pub fn in_memory(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            backend: StoreBackend::Memory(MemoryStore::default()),
        }
    }

    pub fn file(path: impl Into<PathBuf>, prefix: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            key_prefix: prefix.into(),
            backend: StoreBackend::File(FileStore::open(path)?),
        })
    }

    pub fn key(&self, key: SessionKey) -> String {
        format!("{}:{}", self.key_prefix, key.suffix())
    }

    /// Read and deserialize a value, degrading to `None` on any failure.
    pub fn get_json<T>(&self, key: SessionKey) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let full_key = self.key(key);

        let value = match &self.backend {
            StoreBackend::Memory(store) => store.get(&full_key),
            StoreBackend::File(store) => store.get(&full_key),
        };

        let value = match value {
            Ok(value) => value?,
            Err(e) => {
                warn!(?e, session_key = %full_key, "session store read failed; using default");
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(?e, session_key = %full_key, "session store value has wrong shape; using default");
                None
            }
        }
    }

    pub fn set_json<T>(&self, key: SessionKey, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let full_key = self.key(key);
        let payload = serde_json::to_value(value)
            .map_err(|e| anyhow::anyhow!("failed to serialize session value for `{full_key}`: {e}"))?;

        match &self.backend {
            StoreBackend::Memory(store) => store.set(&full_key, payload),
            StoreBackend::File(store) => store.set(&full_key, payload),
        }
    }

    pub fn remove(&self, key: SessionKey) -> anyhow::Result<()> {
        let full_key = self.key(key);

        match &self.backend {
            StoreBackend::Memory(store) => store.del(&full_key),
            StoreBackend::File(store) => store.del(&full_key),
        }
    }

    /// Logout: wipe every namespaced key so a fresh load sees the
    /// fully logged-out defaults.
    pub fn clear_session(&self) -> anyhow::Result<()> {
        for key in SessionKey::ALL {
            self.remove(key)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionKey, SessionStore};

    fn temp_state_path(tag: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "vade-store-{tag}-{}-{}.json",
            std::process::id(),
            vade_test_nonce()
        ));
        path
    }

    fn vade_test_nonce() -> u128 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos())
    }

    #[test]
    fn roundtrips_typed_values() {
        let store = SessionStore::in_memory("vade:test");

        store
            .set_json(SessionKey::ReferralCode, &"ADEBAYO2026".to_owned())
            .unwrap();
        store.set_json(SessionKey::LastReferralCount, &48_u32).unwrap();

        assert_eq!(
            store.get_json::<String>(SessionKey::ReferralCode).as_deref(),
            Some("ADEBAYO2026")
        );
        assert_eq!(store.get_json::<u32>(SessionKey::LastReferralCount), Some(48));
    }

    #[test]
    fn keys_are_prefix_namespaced() {
        let store = SessionStore::in_memory("vade:test");
        assert_eq!(store.key(SessionKey::Token), "vade:test:token");
    }

    #[test]
    fn logout_clears_every_key() {
        let store = SessionStore::in_memory("vade:test");

        store.set_json(SessionKey::Token, &"bearer-abc".to_owned()).unwrap();
        store
            .set_json(SessionKey::DisplayName, &"Dr. Adebayo".to_owned())
            .unwrap();
        store
            .set_json(SessionKey::ReferralCode, &"ADEBAYO2026".to_owned())
            .unwrap();
        store.set_json(SessionKey::City, &"Lagos".to_owned()).unwrap();
        store.set_json(SessionKey::MasteryPulseShown, &true).unwrap();

        store.clear_session().unwrap();

        for key in SessionKey::ALL {
            assert_eq!(store.get_json::<serde_json::Value>(key), None);
        }
    }

    #[test]
    fn wrong_shape_degrades_to_default() {
        let store = SessionStore::in_memory("vade:test");

        store
            .set_json(SessionKey::LastReferralCount, &"not-a-number".to_owned())
            .unwrap();

        assert_eq!(store.get_json::<u32>(SessionKey::LastReferralCount), None);
    }

    #[test]
    fn file_backend_survives_reopen() {
        let path = temp_state_path("reopen");
        let store = SessionStore::file(&path, "vade:test").unwrap();
        store
            .set_json(SessionKey::ReferralCode, &"ADEBAYO2026".to_owned())
            .unwrap();

        let reopened = SessionStore::file(&path, "vade:test").unwrap();
        assert_eq!(
            reopened.get_json::<String>(SessionKey::ReferralCode).as_deref(),
            Some("ADEBAYO2026")
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_degrades_to_logged_out_defaults() {
        let path = temp_state_path("corrupt");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = SessionStore::file(&path, "vade:test").unwrap();
        assert_eq!(store.get_json::<String>(SessionKey::Token), None);
        assert_eq!(store.get_json::<String>(SessionKey::ReferralCode), None);

        let _ = std::fs::remove_file(&path);
    }
}
