//! Durable slot behind the receipt store.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_STATE_PATH: &str = "data/receipts_v2.json";

/// Durable key/value slot holding the serialized receipt sequence.
///
/// Implementations only move raw payloads; the store owns the shape. `load`
/// returns `None` when nothing was stored yet, so first use can seed.
pub trait Persistence: Send + Sync {
    fn load(&self) -> io::Result<Option<String>>;
    fn save(&self, payload: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// File-backed slot: one JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonFilePersistence {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn save(&self, payload: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, payload)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}

pub fn default_state_path() -> &'static str {
    DEFAULT_STATE_PATH
}
