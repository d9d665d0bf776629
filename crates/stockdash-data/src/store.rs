//! Persisted last-viewed symbol.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use stockdash_core::error::StorageError;
use stockdash_core::DEFAULT_SYMBOL;
use tracing::{debug, warn};

/// Key the last-viewed symbol is stored under.
pub const TICKER_KEY: &str = "ticker";

/// Small JSON key-value file holding client state.
pub struct SymbolStore {
    path: PathBuf,
}

impl SymbolStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last-viewed symbol, or `AAPL` if nothing usable is stored.
    pub fn load_symbol(&self) -> String {
        match self.read_entries() {
            Ok(entries) => entries
                .get(TICKER_KEY)
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
            Err(e) => {
                warn!("Could not read {}: {}", self.path.display(), e);
                DEFAULT_SYMBOL.to_string()
            }
        }
    }

    /// Remember `symbol` as the last-viewed one.
    pub fn save_symbol(&self, symbol: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking the write.
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(TICKER_KEY.to_string(), symbol.trim().to_uppercase());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, json)?;
        debug!("Saved {} = {} to {}", TICKER_KEY, symbol, self.path.display());
        Ok(())
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path)?;
        serde_json::from_str(&text).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}
