mod readout;
mod simulated;

pub use readout::*;
pub use simulated::SimulatedLightSensor;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    #[error("Device not found")]
    DeviceNotFound,

    #[error("Bus error: {0}")]
    Bus(String),
}

/// Register-level light sensor driver.
pub trait LightSensorDriver {
    fn init(&mut self) -> Result<(), DriverError>;

    /// Raw luminosity in lux. May exceed the 16-bit range of a report.
    fn measure(&mut self) -> u32;
}
