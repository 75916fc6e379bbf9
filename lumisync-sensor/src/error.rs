use crate::sensor::DriverError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Sensor initialization failed: {0}")]
    SensorInit(#[from] DriverError),

    #[error("Scheduler is not running")]
    SchedulerClosed,

    #[error("Invalid settings: {0}")]
    Settings(String),
}

pub type Result<T> = core::result::Result<T, Error>;
