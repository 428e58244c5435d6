//! Durable key-value storage for small user choices
//!
//! Holds the confirmed plant (`selectedPlant`) and the onboarding location
//! (`userLocation`). `FileStore` keeps everything in one JSON object file;
//! `MemoryStore` is for tests and ephemeral servers.

use crate::catalog::Catalog;
use crate::error::{PlantPalError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

/// Store key for the confirmed plant
pub const SELECTED_PLANT_KEY: &str = "selectedPlant";

/// Shown on the details screen when nothing was confirmed yet
pub const DEFAULT_PLANT: &str = "Basil";

/// String key-value store shared across request handlers
pub trait SelectionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl SelectionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| PlantPalError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| PlantPalError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// JSON file store
// ============================================================================

/// One JSON object file, created on first write
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PlantPalError {
        PlantPalError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|source| PlantPalError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

impl SelectionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().map_err(|_| PlantPalError::LockPoisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| PlantPalError::LockPoisoned)?;

        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(&entries).map_err(|source| PlantPalError::Json {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;

        tracing::debug!("Stored {} in {}", key, self.path.display());
        Ok(())
    }
}

// ============================================================================
// Plant selection
// ============================================================================

/// Plant to show on the details screen (`DEFAULT_PLANT` when unset)
pub fn selected_plant<S>(store: &S) -> Result<String>
where
    S: SelectionStore + ?Sized,
{
    Ok(store
        .get(SELECTED_PLANT_KEY)?
        .unwrap_or_else(|| DEFAULT_PLANT.to_string()))
}

/// Persist the confirmed plant. Names outside the catalog are rejected.
pub fn confirm_selection<S>(store: &S, catalog: &Catalog, name: &str) -> Result<()>
where
    S: SelectionStore + ?Sized,
{
    if catalog.get(name).is_none() {
        return Err(PlantPalError::UnknownPlant(name.to_string()));
    }
    store.set(SELECTED_PLANT_KEY, name)?;
    tracing::info!("Plant selected: {}", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plant_when_unset() {
        let store = MemoryStore::default();
        assert_eq!(selected_plant(&store).unwrap(), "Basil");
    }

    #[test]
    fn test_confirm_selection() {
        let store = MemoryStore::default();
        let catalog = Catalog::default();

        confirm_selection(&store, &catalog, "Peace Lily").unwrap();
        assert_eq!(selected_plant(&store).unwrap(), "Peace Lily");

        let err = confirm_selection(&store, &catalog, "Fern").unwrap_err();
        assert!(matches!(err, PlantPalError::UnknownPlant(ref n) if n == "Fern"));
        assert_eq!(selected_plant(&store).unwrap(), "Peace Lily");
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("selection.json");

        let store = FileStore::new(&path);
        assert_eq!(store.get(SELECTED_PLANT_KEY).unwrap(), None);
        store.set(SELECTED_PLANT_KEY, "Mint").unwrap();
        store.set("userLocation", "Tunis, Tunisia").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(selected_plant(&reopened).unwrap(), "Mint");
        assert_eq!(reopened.get("userLocation").unwrap().as_deref(), Some("Tunis, Tunisia"));
    }

    #[test]
    fn test_file_store_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selection.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get(SELECTED_PLANT_KEY), Err(PlantPalError::Json { .. })));
    }
}
