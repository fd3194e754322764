use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Durable backend: one JSON document on disk, read back on every get so an
/// external writer (another agent run) is always visible.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!("failed to create state directory `{}`: {e}", parent.display())
            })?;
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> anyhow::Result<Option<serde_json::Value>> {
        Ok(self.load()?.remove(key))
    }

    pub fn set(&self, key: &str, value: serde_json::Value) -> anyhow::Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), value);
        self.persist(&entries)
    }

    pub fn del(&self, key: &str) -> anyhow::Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }

        Ok(())
    }

    fn load(&self) -> anyhow::Result<BTreeMap<String, serde_json::Value>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "failed to read state file `{}`: {e}",
                    self.path.display()
                ));
            }
        };

        serde_json::from_slice(&raw).map_err(|e| {
            anyhow::anyhow!("state file `{}` is not valid JSON: {e}", self.path.display())
        })
    }

    fn persist(&self, entries: &BTreeMap<String, serde_json::Value>) -> anyhow::Result<()> {
        let payload = serde_json::to_vec_pretty(entries)
            .map_err(|e| anyhow::anyhow!("failed to serialize session state: {e}"))?;

        fs::write(&self.path, payload).map_err(|e| {
            anyhow::anyhow!("failed to write state file `{}`: {e}", self.path.display())
        })
    }
}
