//! Key-value persistence slots.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::PlannerResult;

/// A string-valued key-value cell, read at startup and rewritten wholesale.
pub trait Slot {
    /// Read a key. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> PlannerResult<Option<String>>;

    /// Replace a key's value.
    fn set(&self, key: &str, value: &str) -> PlannerResult<()>;
}

/// One file per key inside a directory (`<dir>/<key>.json`).
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSlot { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Slot for FileSlot {
    fn get(&self, key: &str) -> PlannerResult<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> PlannerResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Write beside the target, then rename over it
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-process slot.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let slot = Self::new();
        slot.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        slot
    }
}

impl Slot for MemorySlot {
    fn get(&self, key: &str) -> PlannerResult<Option<String>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PlannerResult<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_slot_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let slot = FileSlot::new(dir.path());
        assert_eq!(slot.get("events").unwrap(), None);
    }

    #[test]
    fn file_slot_creates_directory_on_write() {
        let dir = TempDir::new().unwrap();
        let slot = FileSlot::new(dir.path().join("nested/data"));

        slot.set("events", "[]").unwrap();

        assert_eq!(slot.get("events").unwrap().as_deref(), Some("[]"));
        assert!(slot.path_for("events").exists());
    }

    #[test]
    fn memory_slot_overwrites() {
        let slot = MemorySlot::with_value("events", "[1]");
        slot.set("events", "[2]").unwrap();
        assert_eq!(slot.get("events").unwrap().as_deref(), Some("[2]"));
    }
}
