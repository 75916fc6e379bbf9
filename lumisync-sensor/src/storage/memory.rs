use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{NvStorage, StorageError, copy_record};

/// In-memory storage. Clones share the same records, so a test can keep a
/// clone and inspect what the module persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Arc<Mutex<BTreeMap<u8, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, module_id: u8) -> Option<Vec<u8>> {
        self.records().get(&module_id).cloned()
    }

    pub fn clear(&self) {
        self.records().clear();
    }

    fn records(&self) -> MutexGuard<'_, BTreeMap<u8, Vec<u8>>> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NvStorage for MemoryStorage {
    fn load(&self, module_id: u8, buffer: &mut [u8]) -> Result<(), StorageError> {
        let records = self.records();
        let stored = records
            .get(&module_id)
            .ok_or(StorageError::NotFound(module_id))?;

        copy_record(stored, buffer)
    }

    fn save(&mut self, module_id: u8, data: &[u8]) -> Result<(), StorageError> {
        self.records().insert(module_id, data.to_vec());
        Ok(())
    }
}
