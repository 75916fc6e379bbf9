mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("No record stored for module {0}")]
    NotFound(u8),

    #[error("Stored record has {found} bytes, expected {expected}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Non-volatile record storage keyed by module id.
pub trait NvStorage {
    /// Fills `buffer` with the stored record. The stored length must match exactly.
    fn load(&self, module_id: u8, buffer: &mut [u8]) -> Result<(), StorageError>;

    fn save(&mut self, module_id: u8, data: &[u8]) -> Result<(), StorageError>;
}

fn copy_record(stored: &[u8], buffer: &mut [u8]) -> Result<(), StorageError> {
    if stored.len() != buffer.len() {
        return Err(StorageError::SizeMismatch {
            expected: buffer.len(),
            found: stored.len(),
        });
    }

    buffer.copy_from_slice(stored);
    Ok(())
}
