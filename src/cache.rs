//! Leverage preference cache.
//!
//! The leverage last picked for each product is kept in a single JSON object
//! under [`CACHED_LEVERAGES_KEY`], mapping decimal product IDs to leverage,
//! e.g. `{"1":10,"3":2.5}`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use crate::{error::Result, types::ProductId};

/// Storage key of the leverage blob.
pub const CACHED_LEVERAGES_KEY: &str = "cachedLeverages";

/// String key-value storage, such as browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store persisted as a JSON object in a file, rewritten on every update.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store, a missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

/// Result of a leverage cache lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CachedLeverage {
    /// Nothing was ever cached.
    Absent,

    /// The stored blob is not a JSON object and gets replaced on the next
    /// [`LeverageCache::set`].
    Unreadable,

    /// No numeric entry for the product.
    Miss,

    Hit(f64),
}

impl CachedLeverage {
    pub fn leverage(self) -> Option<f64> {
        match self {
            CachedLeverage::Hit(leverage) => Some(leverage),
            _ => None,
        }
    }
}

/// Leverage last picked per product.
#[derive(Clone, Debug)]
pub struct LeverageCache<S> {
    store: S,
}

impl<S: KeyValueStore> LeverageCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Cached leverage of the product.
    pub fn get(&self, product_id: ProductId) -> Result<CachedLeverage> {
        let leverages = match self.load()? {
            Blob::Absent => return Ok(CachedLeverage::Absent),
            Blob::Unreadable => return Ok(CachedLeverage::Unreadable),
            Blob::Leverages(leverages) => leverages,
        };
        Ok(leverages
            .get(&product_id.to_string())
            .and_then(|value| match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .map_or(CachedLeverage::Miss, CachedLeverage::Hit))
    }

    /// Caches leverage of the product, keeping other products intact.
    ///
    /// An unreadable blob is replaced.
    pub fn set(&mut self, product_id: ProductId, leverage: f64) -> Result<()> {
        let mut leverages = match self.load()? {
            Blob::Leverages(leverages) => leverages,
            Blob::Absent | Blob::Unreadable => Map::new(),
        };
        leverages.insert(product_id.to_string(), leverage_value(leverage));
        self.store.set(
            CACHED_LEVERAGES_KEY,
            Value::Object(leverages).to_string(),
        )
    }

    fn load(&self) -> Result<Blob> {
        let Some(blob) = self.store.get(CACHED_LEVERAGES_KEY)? else {
            debug!("no cached leverages");
            return Ok(Blob::Absent);
        };
        match serde_json::from_str(&blob) {
            Ok(Value::Object(leverages)) => Ok(Blob::Leverages(leverages)),
            Ok(_) => {
                warn!("cached leverages is not an object, ignoring");
                Ok(Blob::Unreadable)
            }
            Err(e) => {
                warn!(?e, "unreadable cached leverages, ignoring");
                Ok(Blob::Unreadable)
            }
        }
    }
}

enum Blob {
    Absent,
    Unreadable,
    Leverages(Map<String, Value>),
}

/// Whole leverages are stored as integers.
fn leverage_value(leverage: f64) -> Value {
    if leverage.fract() == 0.0 && leverage.abs() < i64::MAX as f64 {
        Value::from(leverage as i64)
    } else {
        Number::from_f64(leverage).map(Value::Number).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let mut cache = LeverageCache::new(MemoryStore::new());
        assert_eq!(cache.get(3).unwrap(), CachedLeverage::Absent);

        cache.set(3, 10.0).unwrap();
        assert_eq!(cache.get(3).unwrap(), CachedLeverage::Hit(10.0));

        cache.set(3, 2.5).unwrap();
        assert_eq!(cache.get(3).unwrap().leverage(), Some(2.5));
    }

    #[test]
    fn test_set_merges_products() {
        let mut cache = LeverageCache::new(MemoryStore::new());
        cache.set(3, 10.0).unwrap();
        cache.set(5, 2.0).unwrap();
        assert_eq!(cache.get(3).unwrap(), CachedLeverage::Hit(10.0));
        assert_eq!(cache.get(5).unwrap(), CachedLeverage::Hit(2.0));
        assert_eq!(cache.get(1).unwrap(), CachedLeverage::Miss);
        assert_eq!(
            cache.store().get(CACHED_LEVERAGES_KEY).unwrap().as_deref(),
            Some(r#"{"3":10,"5":2}"#)
        );
    }

    #[test]
    fn test_unreadable_blob_differs_from_absent() {
        let mut store = MemoryStore::new();
        store
            .set(CACHED_LEVERAGES_KEY, "{not json".to_string())
            .unwrap();
        let mut cache = LeverageCache::new(store);
        assert_eq!(cache.get(3).unwrap(), CachedLeverage::Unreadable);
        assert_eq!(cache.get(3).unwrap().leverage(), None);

        cache.set(3, 4.0).unwrap();
        assert_eq!(cache.get(3).unwrap(), CachedLeverage::Hit(4.0));
        assert_eq!(cache.get(5).unwrap(), CachedLeverage::Miss);
    }

    #[test]
    fn test_non_object_blob_is_unreadable() {
        let mut store = MemoryStore::new();
        store
            .set(CACHED_LEVERAGES_KEY, "[1,2]".to_string())
            .unwrap();
        let cache = LeverageCache::new(store);
        assert_eq!(cache.get(1).unwrap(), CachedLeverage::Unreadable);
        assert_eq!(
            LeverageCache::new(MemoryStore::new()).get(1).unwrap(),
            CachedLeverage::Absent
        );
    }

    #[test]
    fn test_reads_blob_written_elsewhere() {
        let mut store = MemoryStore::new();
        store
            .set(
                CACHED_LEVERAGES_KEY,
                r#"{"1":"25","2":1.5,"4":null}"#.to_string(),
            )
            .unwrap();
        let cache = LeverageCache::new(store);
        assert_eq!(cache.get(1).unwrap(), CachedLeverage::Hit(25.0));
        assert_eq!(cache.get(2).unwrap(), CachedLeverage::Hit(1.5));
        assert_eq!(cache.get(4).unwrap(), CachedLeverage::Miss);
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut cache = LeverageCache::new(FileStore::open(&path).unwrap());
        cache.set(2, 20.0).unwrap();
        cache.set(7, 3.0).unwrap();

        let cache = LeverageCache::new(FileStore::open(&path).unwrap());
        assert_eq!(cache.get(2).unwrap(), CachedLeverage::Hit(20.0));
        assert_eq!(cache.get(7).unwrap(), CachedLeverage::Hit(3.0));
        assert_eq!(cache.store().path(), path.as_path());
    }
}
