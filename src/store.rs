//! In-memory single-level file store.
//!
//! Fixed capacity, linear scans by name, create-or-overwrite writes. Nothing
//! survives a restart; the store exists so the notepad, terminal, and file
//! browser have a shared namespace to trade documents through.

use thiserror::Error;

/// Number of file slots.
pub const MAX_FILES: usize = 20;
/// File names are truncated to this many characters on write.
pub const MAX_FILENAME_LEN: usize = 31;
/// Payloads are truncated to this many bytes on write.
pub const MAX_FILE_SIZE: usize = 2048;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum StoreError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("no free file slot")]
    NoFreeSlot,
}

#[derive(Debug)]
struct FileEntry {
    name: String,
    data: Vec<u8>,
}

/// Fixed-capacity named-blob store.
#[derive(Debug)]
pub struct FileStore {
    slots: Vec<Option<FileEntry>>,
    revision: u64,
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore {
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(MAX_FILES);
        slots.resize_with(MAX_FILES, || None);
        Self { slots, revision: 0 }
    }

    /// Monotonic counter bumped by every successful `write` and `delete`.
    ///
    /// Callers that cache directory listings (the file browser) compare
    /// revisions instead of re-listing on every keystroke.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| {
            slot.as_ref()
                .map(|entry| entry.name == name)
                .unwrap_or(false)
        })
    }

    /// Create-or-overwrite write. Truncates the name to
    /// [`MAX_FILENAME_LEN`] characters and the payload to [`MAX_FILE_SIZE`]
    /// bytes, and returns the stored size.
    pub fn write(&mut self, name: &str, data: &[u8]) -> Result<usize, StoreError> {
        let name: String = name.chars().take(MAX_FILENAME_LEN).collect();
        let stored = &data[..data.len().min(MAX_FILE_SIZE)];

        let index = match self.find(&name) {
            Some(index) => index,
            None => self
                .slots
                .iter()
                .position(|slot| slot.is_none())
                .ok_or(StoreError::NoFreeSlot)?,
        };

        self.slots[index] = Some(FileEntry {
            name,
            data: stored.to_vec(),
        });
        self.revision += 1;
        Ok(stored.len())
    }

    pub fn read(&self, name: &str) -> Result<&[u8], StoreError> {
        self.find(name)
            .and_then(|index| self.slots[index].as_ref())
            .map(|entry| entry.data.as_slice())
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    pub fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        let index = self
            .find(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        self.slots[index] = None;
        self.revision += 1;
        Ok(())
    }

    /// File names in slot order (not insertion or alphabetical order).
    pub fn list(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().map(|entry| entry.name.clone()))
            .collect()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn size(&self, name: &str) -> Result<usize, StoreError> {
        self.find(name)
            .map(|index| {
                self.slots[index]
                    .as_ref()
                    .map(|entry| entry.data.len())
                    .unwrap_or(0)
            })
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
