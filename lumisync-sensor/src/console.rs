use crate::error::Result;
use crate::scheduler::SchedulerHandle;
use crate::sensor::Measurement;

pub const USAGE: &str = "\
get - get results now
send - get and send results now
period <N> - set period to N minutes
reset - reset settings to default";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsoleError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: period <N>, N in 0..=255")]
    InvalidPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help,
    Get,
    Send,
    Period(u8),
    Reset,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> core::result::Result<Self, ConsoleError> {
        let mut words = line.split_whitespace();

        let command = match words.next() {
            None | Some("help") => Self::Help,
            Some("get") => Self::Get,
            Some("send") => Self::Send,
            Some("reset") => Self::Reset,
            Some("period") => {
                let minutes = words
                    .next()
                    .and_then(|value| value.parse::<u8>().ok())
                    .ok_or(ConsoleError::InvalidPeriod)?;
                Self::Period(minutes)
            }
            Some(other) => return Err(ConsoleError::UnknownCommand(other.into())),
        };

        Ok(command)
    }
}

/// Human-facing console bound to a running module.
#[derive(Debug, Clone)]
pub struct Console {
    scheduler: SchedulerHandle,
}

impl Console {
    pub fn new(scheduler: SchedulerHandle) -> Self {
        Self { scheduler }
    }

    pub async fn execute(&self, command: ConsoleCommand) -> Result<String> {
        let output = match command {
            ConsoleCommand::Help => USAGE.to_string(),
            ConsoleCommand::Get => {
                let payload = self.scheduler.measure().await?;
                let lux = Measurement::decode(&payload).lux();
                format!("Luminosity {lux} lux")
            }
            ConsoleCommand::Send => {
                self.scheduler.poll().await?;
                "Poll requested".to_string()
            }
            ConsoleCommand::Period(0) => {
                self.scheduler.set_period(0).await?;
                "Timer stopped".to_string()
            }
            ConsoleCommand::Period(minutes) => {
                self.scheduler.set_period(minutes).await?;
                format!("Period set to {minutes} minute(s)")
            }
            ConsoleCommand::Reset => {
                let record = self.scheduler.reset().await?;
                format!(
                    "Settings reset: period {} min, bus {}",
                    record.publish_period_minutes, record.bus_index
                )
            }
        };

        Ok(output)
    }
}
