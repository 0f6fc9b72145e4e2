use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context as _;

use crate::foundation::error::SquarizeResult;

/// Key under which the background-color setting is persisted.
pub const BACKGROUND_COLOR_KEY: &str = "background_color";

/// Single string key-value persistence for tool settings.
///
/// The pipeline keeps exactly one setting (the background color); the store
/// is still keyed so alternative frontends can share one settings file.
pub trait SettingsStore {
    /// Read a value. `None` when the key was never written.
    fn load(&self, key: &str) -> SquarizeResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn save(&self, key: &str, value: &str) -> SquarizeResult<()>;
}

/// In-memory settings store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemorySettings {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn load(&self, key: &str) -> SquarizeResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> SquarizeResult<()> {
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Settings persisted as a single JSON object in one file.
#[derive(Clone, Debug)]
pub struct JsonFileSettings {
    path: PathBuf,
}

impl JsonFileSettings {
    /// Create a store over `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> SquarizeResult<BTreeMap<String, String>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read settings file '{}'", self.path.display()))
                    .into());
            }
        };
        let map = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse settings file '{}'", self.path.display()))?;
        Ok(map)
    }
}

impl SettingsStore for JsonFileSettings {
    fn load(&self, key: &str) -> SquarizeResult<Option<String>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> SquarizeResult<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create settings dir '{}'", parent.display()))?;
            }
        }
        let json = serde_json::to_vec_pretty(&map).context("serialize settings")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("write settings file '{}'", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
