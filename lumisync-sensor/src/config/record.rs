use crate::settings::Module;

/// Persisted layout: is_valid(1) + period_minutes(1) + bus_index(1)
pub const RECORD_SIZE: usize = 3;

/// Marker written by every save.
pub const RECORD_VALID: u8 = 0x01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigRecord {
    pub is_valid: u8,
    pub publish_period_minutes: u8,
    pub bus_index: u8,
}

impl ConfigRecord {
    /// Built-in defaults; not valid until saved.
    pub fn defaults(module: &Module) -> Self {
        Self {
            is_valid: 0,
            publish_period_minutes: module.default_period_minutes,
            bus_index: module.default_bus,
        }
    }

    /// `0x00` and `0xFF` mean the record was never written (erased flash reads `0xFF`).
    pub fn is_valid(&self) -> bool {
        !matches!(self.is_valid, 0x00 | 0xFF)
    }

    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        [self.is_valid, self.publish_period_minutes, self.bus_index]
    }

    pub fn decode(data: &[u8; RECORD_SIZE]) -> Self {
        let [is_valid, publish_period_minutes, bus_index] = *data;
        Self {
            is_valid,
            publish_period_minutes,
            bus_index,
        }
    }
}
