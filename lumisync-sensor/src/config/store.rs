use std::time::Duration;

use super::{ConfigRecord, RECORD_SIZE, RECORD_VALID};

use crate::MODULE_ID;
use crate::settings::Module;
use crate::storage::NvStorage;

/// Write-through owner of the persisted configuration record.
///
/// Not synchronised: the scheduler task is its only owner.
pub struct ConfigStore<S>
where
    S: NvStorage,
{
    storage: S,
    module: Module,
    record: ConfigRecord,
}

impl<S> ConfigStore<S>
where
    S: NvStorage,
{
    pub fn new(storage: S, module: Module) -> Self {
        let record = ConfigRecord::defaults(&module);
        Self {
            storage,
            module,
            record,
        }
    }

    pub fn reset_to_defaults(&mut self) {
        self.record = ConfigRecord::defaults(&self.module);
    }

    /// Loads the stored record, falling back to defaults when it is missing,
    /// never written or names a bus that does not exist.
    pub fn load(&mut self) -> ConfigRecord {
        self.reset_to_defaults();

        let mut buffer = [0u8; RECORD_SIZE];
        if let Err(e) = self.storage.load(MODULE_ID, &mut buffer) {
            tracing::info!("Using default configuration: {e}");
            return self.record;
        }

        let record = ConfigRecord::decode(&buffer);
        if !record.is_valid() {
            tracing::info!(
                marker = record.is_valid,
                "Stored configuration is not initialized, using defaults"
            );
            return self.record;
        }

        if record.bus_index >= self.module.bus_count {
            tracing::info!(
                bus = record.bus_index,
                bus_count = self.module.bus_count,
                "Stored bus index out of range, using defaults"
            );
            return self.record;
        }

        self.record = record;
        self.record
    }

    /// Marks the record valid and writes it. Storage failures are logged only.
    pub fn save(&mut self) {
        self.record.is_valid = RECORD_VALID;
        if let Err(e) = self.storage.save(MODULE_ID, &self.record.encode()) {
            tracing::warn!("Failed to persist configuration: {e}");
        }
    }

    pub fn set_period(&mut self, minutes: u8) {
        self.record.publish_period_minutes = minutes;
        self.save();
    }

    pub fn reset(&mut self) {
        self.reset_to_defaults();
        self.save();
    }

    pub fn record(&self) -> ConfigRecord {
        self.record
    }

    /// Publish period, or `None` when periodic publishing is disabled.
    pub fn period(&self) -> Option<Duration> {
        match self.record.publish_period_minutes {
            0 => None,
            minutes => Some(Duration::from_secs(
                u64::from(minutes) * self.module.period_unit_secs,
            )),
        }
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
