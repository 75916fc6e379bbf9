mod handle;
mod message;
mod timer;

pub use handle::SchedulerHandle;
pub use message::SchedulerMessage;
pub use timer::PublishTimer;

use tokio::sync::mpsc;

use crate::MODULE_ID;
use crate::config::ConfigStore;
use crate::error::Result;
use crate::sensor::{LightSensorDriver, SensorReadout};
use crate::sink::{EventSink, Report};
use crate::storage::NvStorage;

/// Trigger queue depth.
pub const QUEUE_DEPTH: usize = 4;

/// The periodic publisher.
///
/// Owns the sensor, the configuration and the timer. Timer expiries, polls and
/// configuration changes are all messages on one FIFO queue, so each
/// measurement cycle runs to completion before the next message is looked at.
pub struct Scheduler<D, S, K>
where
    D: LightSensorDriver,
    S: NvStorage,
    K: EventSink,
{
    readout: SensorReadout<D>,
    config: ConfigStore<S>,
    sink: K,
    timer: PublishTimer,
    ack_requested: bool,
    queue: mpsc::Receiver<SchedulerMessage>,
}

impl<D, S, K> Scheduler<D, S, K>
where
    D: LightSensorDriver + Send + 'static,
    S: NvStorage + Send + 'static,
    K: EventSink + Send + 'static,
{
    /// Loads the configuration, initializes the sensor and spawns the
    /// publisher task. A sensor that fails to initialize leaves the module
    /// inert: nothing is spawned and no timer is armed.
    pub fn start(
        mut readout: SensorReadout<D>,
        mut config: ConfigStore<S>,
        sink: K,
    ) -> Result<SchedulerHandle> {
        let record = config.load();
        tracing::info!("Publish period: {} min", record.publish_period_minutes);

        if let Err(e) = readout.initialize() {
            tracing::error!("Unable to init sensor: {e}");
            return Err(e.into());
        }

        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        let mut scheduler = Self {
            readout,
            config,
            sink,
            timer: PublishTimer::new(tx.downgrade()),
            ack_requested: false,
            queue: rx,
        };

        scheduler.rearm();
        tokio::spawn(scheduler.run());

        Ok(SchedulerHandle::new(tx))
    }

    async fn run(mut self) {
        tracing::info!("Periodic publisher started");

        while let Some(message) = self.queue.recv().await {
            match message {
                SchedulerMessage::TimerExpired { epoch } => {
                    if self.timer.is_current(epoch) {
                        self.publish();
                    } else {
                        tracing::debug!(epoch, "Dropping stale timer expiry");
                    }
                }
                SchedulerMessage::Poll => {
                    self.ack_requested = true;
                    self.publish();
                }
                SchedulerMessage::SetPeriod { minutes, done } => {
                    self.set_period(minutes);
                    let _ = done.send(self.config.record());
                }
                SchedulerMessage::Reset { done } => {
                    self.config.reset();
                    tracing::info!("Configuration reset to defaults");
                    let _ = done.send(self.config.record());
                }
                SchedulerMessage::Reinit { done } => {
                    let result = self.readout.initialize();
                    if let Err(e) = &result {
                        tracing::warn!("Sensor reinitialization failed: {e}");
                    }
                    let _ = done.send(result);
                }
                SchedulerMessage::Measure { done } => {
                    let _ = done.send(self.readout.prepare());
                }
                SchedulerMessage::Config { done } => {
                    let _ = done.send(self.config.record());
                }
                SchedulerMessage::Shutdown { done } => {
                    self.queue.close();
                    self.timer.invalidate();
                    let _ = done.send(());
                    break;
                }
            }
        }

        self.timer.invalidate();
        tracing::info!("Periodic publisher stopped");
    }

    /// One measurement cycle: stop the pending timer, measure, deliver, re-arm.
    /// Expiries already queued stay valid and run their own cycle.
    fn publish(&mut self) {
        self.timer.stop();

        let ack = core::mem::take(&mut self.ack_requested);
        let payload = self.readout.prepare();

        self.sink.deliver(Report {
            module_id: MODULE_ID,
            ack,
            payload,
        });

        self.rearm();
    }

    fn set_period(&mut self, minutes: u8) {
        // Expiries queued under the old period must not fire
        self.timer.invalidate();
        self.config.set_period(minutes);

        if self.rearm() {
            tracing::info!("Period set to {minutes} minute(s)");
        } else {
            tracing::info!("Timer stopped");
        }
    }

    /// Arms the timer unless publishing is disabled. Returns whether it armed.
    fn rearm(&mut self) -> bool {
        match self.config.period() {
            Some(period) => {
                self.timer.arm(period);
                true
            }
            None => false,
        }
    }
}
