use super::{Command, REPLY_SIZE, Reply};

use crate::error::{Error, Result};
use crate::scheduler::SchedulerHandle;

/// Binary command endpoint of the module.
#[derive(Debug, Clone)]
pub struct CommandProtocol {
    scheduler: SchedulerHandle,
}

impl CommandProtocol {
    pub fn new(scheduler: SchedulerHandle) -> Self {
        Self { scheduler }
    }

    /// Handles one command buffer. `None` means no synchronous reply is due,
    /// which is the case for a successful poll.
    pub async fn handle(&self, data: &[u8]) -> Option<[u8; REPLY_SIZE]> {
        let command = match Command::decode(data) {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!("Rejecting command {data:02x?}: {e}");
                return Some(Reply::Fail.encode());
            }
        };

        match self.dispatch(command).await {
            Ok(reply) => reply.map(|reply| reply.encode()),
            Err(e) => {
                tracing::warn!("Command {command:?} failed: {e}");
                Some(Reply::Fail.encode())
            }
        }
    }

    async fn dispatch(&self, command: Command) -> Result<Option<Reply>> {
        match command {
            Command::SetPeriod { minutes } => {
                self.scheduler.set_period(minutes).await?;
                Ok(Some(Reply::Ok))
            }
            Command::Poll => {
                self.scheduler.poll().await?;
                Ok(None)
            }
            Command::SetI2c { bus_index } => {
                if let Some(bus) = bus_index {
                    tracing::debug!(bus, "Bus selection not applied, reinitializing on current bus");
                }

                match self.scheduler.reinit().await {
                    Ok(()) | Err(Error::SensorInit(_)) => Ok(Some(Reply::Ok)),
                    Err(e) => Err(e),
                }
            }
        }
    }
}
