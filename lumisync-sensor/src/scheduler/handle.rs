use tokio::sync::{mpsc, oneshot};

use super::SchedulerMessage;

use crate::config::ConfigRecord;
use crate::error::{Error, Result};
use crate::sensor::PAYLOAD_SIZE;

/// Cloneable entry point into the scheduler task. The task stops once every
/// handle is dropped or `shutdown` is called.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    queue: mpsc::Sender<SchedulerMessage>,
}

impl SchedulerHandle {
    pub(super) fn new(queue: mpsc::Sender<SchedulerMessage>) -> Self {
        Self { queue }
    }

    /// Requests an immediate report flagged as acknowledgement.
    pub async fn poll(&self) -> Result<()> {
        self.queue
            .send(SchedulerMessage::Poll)
            .await
            .map_err(|_| Error::SchedulerClosed)
    }

    pub async fn set_period(&self, minutes: u8) -> Result<ConfigRecord> {
        self.request(|done| SchedulerMessage::SetPeriod { minutes, done })
            .await
    }

    /// Restores and persists the default configuration. The pending timer is
    /// left alone; the new period applies from the next re-arm.
    pub async fn reset(&self) -> Result<ConfigRecord> {
        self.request(|done| SchedulerMessage::Reset { done }).await
    }

    pub async fn reinit(&self) -> Result<()> {
        self.request(|done| SchedulerMessage::Reinit { done })
            .await?
            .map_err(Error::SensorInit)
    }

    /// Reads and encodes a payload without delivering it.
    pub async fn measure(&self) -> Result<[u8; PAYLOAD_SIZE]> {
        self.request(|done| SchedulerMessage::Measure { done }).await
    }

    pub async fn config(&self) -> Result<ConfigRecord> {
        self.request(|done| SchedulerMessage::Config { done }).await
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.request(|done| SchedulerMessage::Shutdown { done }).await
    }

    pub fn is_closed(&self) -> bool {
        self.queue.is_closed()
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> SchedulerMessage,
    ) -> Result<T> {
        let (done, reply) = oneshot::channel();

        self.queue
            .send(message(done))
            .await
            .map_err(|_| Error::SchedulerClosed)?;

        reply.await.map_err(|_| Error::SchedulerClosed)
    }
}
