use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{NvStorage, StorageError, copy_record};

/// One file per module id under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn record_path(&self, module_id: u8) -> PathBuf {
        self.dir.join(format!("module-{module_id:03}.bin"))
    }
}

impl NvStorage for FileStorage {
    fn load(&self, module_id: u8, buffer: &mut [u8]) -> Result<(), StorageError> {
        let stored = fs::read(self.record_path(module_id)).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(module_id),
            _ => StorageError::Io(e),
        })?;

        copy_record(&stored, buffer)
    }

    fn save(&mut self, module_id: u8, data: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.record_path(module_id), data)?;
        Ok(())
    }
}
