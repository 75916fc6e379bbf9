use std::time::Duration;

use tokio::sync::mpsc::WeakSender;
use tokio::task::JoinHandle;

use super::SchedulerMessage;

/// Re-armable one-shot timer that enqueues `TimerExpired` on the scheduler queue.
///
/// `stop` only drops the pending sleep; an expiry already in the queue is still
/// a trigger. `invalidate` also bumps the epoch, so queued expiries from before
/// it are recognised as stale.
pub struct PublishTimer {
    queue: WeakSender<SchedulerMessage>,
    epoch: u64,
    task: Option<JoinHandle<()>>,
}

impl PublishTimer {
    pub fn new(queue: WeakSender<SchedulerMessage>) -> Self {
        Self {
            queue,
            epoch: 0,
            task: None,
        }
    }

    pub fn arm(&mut self, after: Duration) {
        self.stop();

        let epoch = self.epoch;
        let queue = self.queue.clone();
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(after).await;

            // The scheduler is gone once every strong sender is dropped
            if let Some(queue) = queue.upgrade() {
                let _ = queue.send(SchedulerMessage::TimerExpired { epoch }).await;
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn invalidate(&mut self) {
        self.stop();
        self.epoch = self.epoch.wrapping_add(1);
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for PublishTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
