use super::{DriverError, LightSensorDriver};

use crate::MODULE_ID;

/// Report payload size: module id(1) + luminosity(2)
pub const PAYLOAD_SIZE: usize = 3;

/// Luminosity in lux, saturated to the 16-bit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Measurement(u16);

impl Measurement {
    pub fn from_raw(raw: u32) -> Self {
        Self(u16::try_from(raw).unwrap_or(u16::MAX))
    }

    pub fn lux(&self) -> u16 {
        self.0
    }

    pub fn encode(&self) -> [u8; PAYLOAD_SIZE] {
        let [low, high] = self.0.to_le_bytes();
        [MODULE_ID, low, high]
    }

    pub fn decode(payload: &[u8; PAYLOAD_SIZE]) -> Self {
        let [_, low, high] = *payload;
        Self(u16::from_le_bytes([low, high]))
    }
}

pub struct SensorReadout<D>
where
    D: LightSensorDriver,
{
    driver: D,
}

impl<D> SensorReadout<D>
where
    D: LightSensorDriver,
{
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn initialize(&mut self) -> Result<(), DriverError> {
        tracing::info!("Initializing light sensor");
        self.driver.init()
    }

    pub fn read(&mut self) -> Measurement {
        Measurement::from_raw(self.driver.measure())
    }

    pub fn encode(&self, measurement: Measurement) -> [u8; PAYLOAD_SIZE] {
        measurement.encode()
    }

    /// Reads the sensor and returns the encoded report payload.
    pub fn prepare(&mut self) -> [u8; PAYLOAD_SIZE] {
        let measurement = self.read();
        tracing::debug!("Luminosity {} lux", measurement.lux());
        self.encode(measurement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDriver {
        raw: u32,
        init_ok: bool,
    }

    impl LightSensorDriver for FixedDriver {
        fn init(&mut self) -> Result<(), DriverError> {
            if self.init_ok {
                Ok(())
            } else {
                Err(DriverError::DeviceNotFound)
            }
        }

        fn measure(&mut self) -> u32 {
            self.raw
        }
    }

    fn readout(raw: u32) -> SensorReadout<FixedDriver> {
        SensorReadout::new(FixedDriver { raw, init_ok: true })
    }

    #[test]
    fn test_clamp() {
        const CASES: &[(u32, u16)] = &[
            (0, 0),
            (1234, 1234),
            (65535, 65535),
            (65536, 65535),
            (83865, 65535),
            (u32::MAX, 65535),
        ];

        for &(raw, expected) in CASES {
            assert_eq!(readout(raw).read().lux(), expected, "raw {raw}");
        }
    }

    #[test]
    fn test_payload_is_little_endian() {
        assert_eq!(readout(0x1234).prepare(), [MODULE_ID, 0x34, 0x12]);
        assert_eq!(readout(100_000).prepare(), [MODULE_ID, 0xFF, 0xFF]);
        assert_eq!(Measurement::decode(&[MODULE_ID, 0x34, 0x12]).lux(), 0x1234);
    }

    #[test]
    fn test_initialize_propagates_failure() {
        let mut readout = SensorReadout::new(FixedDriver {
            raw: 0,
            init_ok: false,
        });
        assert_eq!(readout.initialize(), Err(DriverError::DeviceNotFound));
    }
}
