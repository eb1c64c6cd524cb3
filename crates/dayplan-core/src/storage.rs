//! Key-value backends the task store persists through.

use std::collections::BTreeMap;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

pub trait KeyValueStorage {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// `None` stands for an environment without any storage facility: nothing is read
/// back and writes are dropped, so the store lives for the session only.
impl<S: KeyValueStorage> KeyValueStorage for Option<S> {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        match self {
            Some(storage) => storage.read(key),
            None => Ok(None),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match self {
            Some(storage) => storage.write(key, value),
            None => {
                tracing::debug!(key, bytes = value.len(), "no storage available; write dropped");
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::default();
        storage.entries.insert(key.into(), value.into());
        storage
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_reads_back_writes() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.read("k").expect("read"), None);
        storage.write("k", "[]").expect("write");
        assert_eq!(storage.read("k").expect("read").as_deref(), Some("[]"));
        assert_eq!(storage.get("k"), Some("[]"));
    }

    #[test]
    fn missing_storage_is_silent() {
        let mut storage: Option<MemoryStorage> = None;
        storage.write("k", "[]").expect("write is dropped");
        assert_eq!(storage.read("k").expect("read"), None);
    }
}
