#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use lumisync_sensor::config::ConfigStore;
use lumisync_sensor::scheduler::{Scheduler, SchedulerHandle};
use lumisync_sensor::sensor::{DriverError, LightSensorDriver, SensorReadout};
use lumisync_sensor::settings::Module;
use lumisync_sensor::sink::Report;
use lumisync_sensor::storage::MemoryStorage;

pub const MODULE: Module = Module {
    default_period_minutes: 1,
    default_bus: 1,
    bus_count: 2,
    period_unit_secs: 60,
};

/// Blocks `measure` while held, keeping the scheduler task busy.
#[derive(Debug, Default)]
pub struct MeasureGate {
    held: Mutex<bool>,
    released: Condvar,
    entered: AtomicBool,
}

/// Driver whose reading and init outcome the test controls.
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    pub raw: Arc<AtomicU32>,
    pub fail_init: Arc<AtomicBool>,
    pub init_calls: Arc<AtomicUsize>,
    pub gate: Arc<MeasureGate>,
}

impl MockDriver {
    pub fn with_raw(raw: u32) -> Self {
        let driver = Self::default();
        driver.raw.store(raw, Ordering::SeqCst);
        driver
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn hold(&self) {
        *self.gate.held.lock().unwrap() = true;
        self.gate.entered.store(false, Ordering::SeqCst);
    }

    pub fn release(&self) {
        *self.gate.held.lock().unwrap() = false;
        self.gate.released.notify_all();
    }

    /// Waits until a held `measure` call is blocking the scheduler task.
    pub async fn wait_entered(&self) {
        while !self.gate.entered.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

impl LightSensorDriver for MockDriver {
    fn init(&mut self) -> Result<(), DriverError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init.load(Ordering::SeqCst) {
            Err(DriverError::DeviceNotFound)
        } else {
            Ok(())
        }
    }

    fn measure(&mut self) -> u32 {
        let mut held = self.gate.held.lock().unwrap();
        if *held {
            self.gate.entered.store(true, Ordering::SeqCst);
        }
        while *held {
            held = self.gate.released.wait(held).unwrap();
        }

        self.raw.load(Ordering::SeqCst)
    }
}

pub struct MockModule {
    pub scheduler: SchedulerHandle,
    pub reports: mpsc::UnboundedReceiver<Report>,
    pub storage: MemoryStorage,
    pub driver: MockDriver,
}

impl MockModule {
    pub fn start(raw: u32) -> Self {
        Self::start_with(MockDriver::with_raw(raw), MemoryStorage::new())
    }

    pub fn start_with(driver: MockDriver, storage: MemoryStorage) -> Self {
        Self::start_with_module(driver, storage, MODULE)
    }

    pub fn start_with_module(driver: MockDriver, storage: MemoryStorage, module: Module) -> Self {
        let (tx, reports) = mpsc::unbounded_channel();

        let scheduler = Scheduler::start(
            SensorReadout::new(driver.clone()),
            ConfigStore::new(storage.clone(), module),
            tx,
        )
        .unwrap();

        Self {
            scheduler,
            reports,
            storage,
            driver,
        }
    }
}

/// Asserts that `secs` of simulated time passed since `start`, within timer resolution.
pub fn assert_elapsed(start: tokio::time::Instant, secs: u64) {
    let elapsed = start.elapsed();
    let expected = std::time::Duration::from_secs(secs);
    assert!(
        elapsed >= expected && elapsed < expected + std::time::Duration::from_secs(1),
        "expected {expected:?} elapsed, got {elapsed:?}"
    );
}
