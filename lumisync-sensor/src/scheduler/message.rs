use tokio::sync::oneshot;

use crate::config::ConfigRecord;
use crate::sensor::{DriverError, PAYLOAD_SIZE};

/// Everything the scheduler task does arrives through its queue, in order.
#[derive(Debug)]
pub enum SchedulerMessage {
    TimerExpired {
        epoch: u64,
    },
    Poll,
    SetPeriod {
        minutes: u8,
        done: oneshot::Sender<ConfigRecord>,
    },
    Reset {
        done: oneshot::Sender<ConfigRecord>,
    },
    Reinit {
        done: oneshot::Sender<Result<(), DriverError>>,
    },
    Measure {
        done: oneshot::Sender<[u8; PAYLOAD_SIZE]>,
    },
    Config {
        done: oneshot::Sender<ConfigRecord>,
    },
    Shutdown {
        done: oneshot::Sender<()>,
    },
}
