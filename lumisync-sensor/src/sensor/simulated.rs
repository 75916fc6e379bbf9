use std::f64::consts::PI;
use std::time::{Duration, Instant};

use rand::Rng;

use super::{DriverError, LightSensorDriver};

use crate::settings;

/// Driver that follows a compressed day/night cycle, for running the module
/// without hardware.
#[derive(Debug, Clone)]
pub struct SimulatedLightSensor {
    fixed_raw: Option<u32>,
    day_length: Duration,
    started: Instant,
}

impl SimulatedLightSensor {
    pub fn new(day_length: Duration) -> Self {
        Self {
            fixed_raw: None,
            day_length,
            started: Instant::now(),
        }
    }

    pub fn fixed(raw: u32) -> Self {
        Self {
            fixed_raw: Some(raw),
            ..Self::new(Duration::from_secs(86400))
        }
    }

    pub fn from_settings(sensor: &settings::Sensor) -> Self {
        match sensor.fixed_raw {
            Some(raw) => Self::fixed(raw),
            None => Self::new(Duration::from_secs(sensor.day_length_secs.max(1))),
        }
    }

    fn day_fraction(&self) -> f64 {
        let day = self.day_length.as_secs_f64();
        (self.started.elapsed().as_secs_f64() % day) / day
    }
}

impl LightSensorDriver for SimulatedLightSensor {
    fn init(&mut self) -> Result<(), DriverError> {
        self.started = Instant::now();
        Ok(())
    }

    fn measure(&mut self) -> u32 {
        if let Some(raw) = self.fixed_raw {
            return raw;
        }

        let jitter = rand::rng().random_range(0.98..1.02);
        (simulation_lux(self.day_fraction()) * jitter).round() as u32
    }
}

pub fn simulation_lux(day_fraction: f64) -> f64 {
    // Full sunlight saturates the sensor above the 16-bit report range
    const MAX_SUNLIGHT_LUX: f64 = 83865.0;
    const MAX_MOONLIGHT_LUX: f64 = 5.0;

    const SUNRISE_START: f64 = 0.23;
    const SUNRISE_END: f64 = 0.25;
    const SUNSET_START: f64 = 0.73;
    const SUNSET_END: f64 = 0.75;

    if (SUNRISE_START..=SUNSET_END).contains(&day_fraction) {
        if day_fraction <= SUNRISE_END {
            let t = (day_fraction - SUNRISE_START) / (SUNRISE_END - SUNRISE_START);
            (t * PI / 2.0).sin() * MAX_SUNLIGHT_LUX
        } else if day_fraction >= SUNSET_START {
            let t = (day_fraction - SUNSET_START) / (SUNSET_END - SUNSET_START);
            (t * PI / 2.0).cos() * MAX_SUNLIGHT_LUX
        } else {
            MAX_SUNLIGHT_LUX
        }
    } else {
        // Moonlight peaks at midnight
        let radians = day_fraction * 2.0 * PI;
        (radians + PI).cos().max(0.0) * (MAX_MOONLIGHT_LUX - 0.01) + 0.01
    }
}
