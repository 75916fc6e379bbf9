use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, timeout};

use lumisync_sensor::config::{ConfigRecord, ConfigStore};
use lumisync_sensor::scheduler::Scheduler;
use lumisync_sensor::sensor::SensorReadout;
use lumisync_sensor::storage::{MemoryStorage, NvStorage};
use lumisync_sensor::{Error, MODULE_ID};

mod common;
use common::{MODULE, MockDriver, MockModule, assert_elapsed};

#[tokio::test(start_paused = true)]
async fn test_timer_publishes_every_period() {
    let mut module = MockModule::start(500);
    let start = Instant::now();

    let report = module.reports.recv().await.unwrap();
    assert_elapsed(start, 60);
    assert!(!report.ack);
    assert_eq!(report.module_id, MODULE_ID);
    assert_eq!(report.payload, [MODULE_ID, 0xF4, 0x01]);

    module.reports.recv().await.unwrap();
    assert_elapsed(start, 120);
}

#[tokio::test(start_paused = true)]
async fn test_poll_reports_with_ack_and_restarts_timer() {
    let mut module = MockModule::start(500);

    tokio::time::sleep(Duration::from_secs(30)).await;
    module.scheduler.poll().await.unwrap();

    let polled = module.reports.recv().await.unwrap();
    assert!(polled.ack);

    // The pending timer was replaced by a fresh full period
    let polled_at = Instant::now();
    let scheduled = module.reports.recv().await.unwrap();
    assert!(!scheduled.ack);
    assert_elapsed(polled_at, 60);
}

#[tokio::test(start_paused = true)]
async fn test_queued_triggers_are_not_coalesced() {
    let mut module = MockModule::start(500);

    module.scheduler.poll().await.unwrap();
    module.scheduler.poll().await.unwrap();

    assert!(module.reports.recv().await.unwrap().ack);
    assert!(module.reports.recv().await.unwrap().ack);

    let next = module.reports.recv().await.unwrap();
    assert!(!next.ack);
}

#[tokio::test(start_paused = true)]
async fn test_zero_period_disables_timer_until_reenabled() {
    let mut module = MockModule::start(500);

    let record = module.scheduler.set_period(0).await.unwrap();
    assert_eq!(record.publish_period_minutes, 0);

    assert!(
        timeout(Duration::from_secs(24 * 3600), module.reports.recv())
            .await
            .is_err()
    );

    // Polling still works while the timer is stopped
    module.scheduler.poll().await.unwrap();
    assert!(module.reports.recv().await.unwrap().ack);
    assert!(
        timeout(Duration::from_secs(24 * 3600), module.reports.recv())
            .await
            .is_err()
    );

    let start = Instant::now();
    module.scheduler.set_period(5).await.unwrap();
    module.reports.recv().await.unwrap();
    assert_elapsed(start, 300);
}

#[tokio::test(start_paused = true)]
async fn test_set_period_persists() {
    let module = MockModule::start(500);

    module.scheduler.set_period(10).await.unwrap();

    assert_eq!(module.storage.get(MODULE_ID), Some(vec![1, 10, 1]));
    let record = module.scheduler.config().await.unwrap();
    assert_eq!(record.publish_period_minutes, 10);
    assert!(record.is_valid());
}

#[tokio::test(start_paused = true)]
async fn test_stored_configuration_is_restored() {
    let mut storage = MemoryStorage::new();
    storage.save(MODULE_ID, &[1, 3, 0]).unwrap();

    let mut module = MockModule::start_with(MockDriver::with_raw(1), storage);
    let record = module.scheduler.config().await.unwrap();
    assert_eq!(record.publish_period_minutes, 3);
    assert_eq!(record.bus_index, 0);

    let start = Instant::now();
    module.reports.recv().await.unwrap();
    assert_elapsed(start, 180);
}

#[tokio::test(start_paused = true)]
async fn test_corrupt_configuration_falls_back_to_defaults() {
    let mut storage = MemoryStorage::new();
    storage.save(MODULE_ID, &[0xFF, 3, 0]).unwrap();

    let module = MockModule::start_with(MockDriver::with_raw(1), storage);
    let record = module.scheduler.config().await.unwrap();
    assert_eq!(record, ConfigRecord::defaults(&MODULE));
}

#[tokio::test(start_paused = true)]
async fn test_reset_persists_defaults() {
    let module = MockModule::start(500);

    module.scheduler.set_period(42).await.unwrap();
    let record = module.scheduler.reset().await.unwrap();

    assert_eq!(record.publish_period_minutes, 1);
    assert_eq!(module.storage.get(MODULE_ID), Some(vec![1, 1, 1]));
}

#[tokio::test(start_paused = true)]
async fn test_measure_does_not_deliver() {
    let mut module = MockModule::start(100_000);

    let payload = module.scheduler.measure().await.unwrap();
    assert_eq!(payload, [MODULE_ID, 0xFF, 0xFF]);
    assert!(module.reports.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_clamped_report() {
    let mut module = MockModule::start(100_000);

    module.scheduler.poll().await.unwrap();
    let report = module.reports.recv().await.unwrap();
    assert_eq!(report.payload, [MODULE_ID, 0xFF, 0xFF]);
    assert_eq!(report.lux(), u16::MAX);
}

#[tokio::test]
async fn test_init_failure_leaves_module_inert() {
    let driver = MockDriver::with_raw(1);
    driver
        .fail_init
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let result = Scheduler::start(
        SensorReadout::new(driver.clone()),
        ConfigStore::new(MemoryStorage::new(), MODULE),
        tx,
    );

    assert!(matches!(result, Err(Error::SensorInit(_))));
    assert_eq!(driver.init_calls(), 1);
    // The sink was dropped with the failed start
    assert!(rx.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_reinit_reports_driver_failure() {
    let module = MockModule::start(1);

    module.scheduler.reinit().await.unwrap();
    assert_eq!(module.driver.init_calls(), 2);

    module
        .driver
        .fail_init
        .store(true, std::sync::atomic::Ordering::SeqCst);
    assert!(matches!(
        module.scheduler.reinit().await,
        Err(Error::SensorInit(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_publishing() {
    let mut module = MockModule::start(1);

    module.scheduler.shutdown().await.unwrap();

    assert!(matches!(
        module.scheduler.poll().await,
        Err(Error::SchedulerClosed)
    ));
    assert!(module.scheduler.is_closed());
    assert!(module.reports.recv().await.is_none());
}
