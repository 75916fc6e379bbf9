use std::{env, fs};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Names a TOML file that replaces the built-in defaults.
pub const CONFIG_ENV: &str = "LUMISYNC_SENSOR_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub default_period_minutes: u8,
    pub default_bus: u8,
    pub bus_count: u8,
    /// Length of one period "minute". Shortened only for bench runs.
    #[serde(default = "default_period_unit_secs")]
    pub period_unit_secs: u64,
}

fn default_period_unit_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storage {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    pub fixed_raw: Option<u32>,
    pub day_length_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub module: Module,
    pub storage: Storage,
    pub sensor: Sensor,
}

impl Settings {
    pub fn new() -> Result<Self, Error> {
        let settings = match env::var(CONFIG_ENV) {
            Ok(path) => {
                let content = fs::read_to_string(&path)
                    .map_err(|e| Error::Settings(format!("{path}: {e}")))?;
                Self::parse(&content)?
            }
            Err(_) => Self::parse(include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../",
                "configs/default.toml"
            )))?,
        };

        Ok(settings)
    }

    pub fn parse(content: &str) -> Result<Self, Error> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| Error::Settings(e.to_string()))?;

        if settings.module.bus_count == 0 {
            return Err(Error::Settings("bus_count must be at least 1".into()));
        }

        if settings.module.period_unit_secs == 0 {
            return Err(Error::Settings("period_unit_secs must be at least 1".into()));
        }

        if settings.module.default_bus >= settings.module.bus_count {
            return Err(Error::Settings(format!(
                "default_bus {} is out of range for {} buses",
                settings.module.default_bus, settings.module.bus_count
            )));
        }

        Ok(settings)
    }
}
