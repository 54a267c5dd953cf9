//! Transient key/value store for the master-binary handshake.
//!
//! The parent records the master binary path before hand-off and clears it
//! right before the process image is replaced; a relaunched child reads and
//! clears whatever is left. Nothing else reads or writes it, and a run that
//! never hands off never touches it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

pub const NAMESPACE: &str = "recast";
pub const MASTER_BINARY_KEY: &str = "master_binary";
pub const STORE_FILE_NAME: &str = "handoff.json";

pub trait TransientStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>>;
    fn set(&mut self, namespace: &str, key: &str, value: &str) -> Result<()>;
    fn clear(&mut self, namespace: &str) -> Result<()>;
}

/// In-process store. Enough when the handshake value travels on argv.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<(String, String), String>,
}

impl TransientStore for MemoryStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .get(&(namespace.to_string(), key.to_string()))
            .cloned())
    }

    fn set(&mut self, namespace: &str, key: &str, value: &str) -> Result<()> {
        self.entries
            .insert((namespace.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    fn clear(&mut self, namespace: &str) -> Result<()> {
        self.entries.retain(|(ns, _), _| ns != namespace);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    namespaces: BTreeMap<String, BTreeMap<String, String>>,
}

/// JSON file store, normally `<cache>/handoff.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_cache_dir(cache_dir: &Path) -> Self {
        Self::new(cache_dir.join(STORE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreFile> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StoreFile::default()),
            Err(e) => return Err(Error::io(format!("read {}", self.path.display()), e)),
        };
        serde_json::from_str(&content).map_err(|source| Error::Store {
            path: self.path.clone(),
            source,
        })
    }

    /// Like [`Self::load`], but a corrupt file counts as empty so that the
    /// next save replaces it. The flag tells whether that happened.
    fn load_for_update(&self) -> Result<(StoreFile, bool)> {
        match self.load() {
            Ok(data) => Ok((data, false)),
            Err(Error::Store { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "discarding corrupt hand-off store");
                Ok((StoreFile::default(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, data: &StoreFile) -> Result<()> {
        if data.namespaces.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                    Err(Error::io(format!("remove {}", self.path.display()), e))
                }
                _ => Ok(()),
            };
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io(format!("create {}", parent.display()), e))?;
        }
        let content = serde_json::to_string_pretty(data).map_err(|source| Error::Store {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, content)
            .map_err(|e| Error::io(format!("write {}", self.path.display()), e))
    }
}

impl TransientStore for FileStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        Ok(self
            .load()?
            .namespaces
            .get(namespace)
            .and_then(|ns| ns.get(key))
            .cloned())
    }

    fn set(&mut self, namespace: &str, key: &str, value: &str) -> Result<()> {
        let (mut data, _) = self.load_for_update()?;
        data.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.save(&data)
    }

    fn clear(&mut self, namespace: &str) -> Result<()> {
        let (mut data, corrupt) = self.load_for_update()?;
        if data.namespaces.remove(namespace).is_some() || corrupt {
            self.save(&data)?;
        }
        Ok(())
    }
}
