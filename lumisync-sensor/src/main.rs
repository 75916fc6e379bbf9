use tokio::io::{AsyncBufReadExt, BufReader};

use lumisync_sensor::config::ConfigStore;
use lumisync_sensor::console::{Console, ConsoleCommand};
use lumisync_sensor::protocol::CommandProtocol;
use lumisync_sensor::scheduler::Scheduler;
use lumisync_sensor::sensor::{SensorReadout, SimulatedLightSensor};
use lumisync_sensor::settings::Settings;
use lumisync_sensor::sink::LogSink;
use lumisync_sensor::storage::FileStorage;

fn parse_hex(input: &str) -> Option<Vec<u8>> {
    input
        .split_whitespace()
        .map(|byte| u8::from_str_radix(byte, 16).ok())
        .collect()
}

#[tokio::main]
async fn main() {
    let settings = Settings::new().expect("Failed to load settings.");

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let app_name = env!("CARGO_PKG_NAME").replace('-', "_");
            let level = settings.logger.level.as_str();

            format!("{app_name}={level}").into()
        }))
        .init();

    let config = ConfigStore::new(FileStorage::new(&settings.storage.path), settings.module);
    let readout = SensorReadout::new(SimulatedLightSensor::from_settings(&settings.sensor));

    let scheduler = match Scheduler::start(readout, config, LogSink) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            tracing::error!("Module inactive: {e}");
            return;
        }
    };

    let console = Console::new(scheduler.clone());
    let protocol = CommandProtocol::new(scheduler.clone());

    // Console lines, or `cmd <hex bytes>` for the binary protocol
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();

        if let Some(hex) = line.strip_prefix("cmd") {
            match parse_hex(hex) {
                Some(bytes) => match protocol.handle(&bytes).await {
                    Some(reply) => println!("reply: {reply:02x?}"),
                    None => println!("no reply"),
                },
                None => println!("Usage: cmd <hex bytes>, e.g. cmd 00 0a"),
            }
            continue;
        }

        match ConsoleCommand::parse(line) {
            Ok(command) => match console.execute(command).await {
                Ok(output) => println!("{output}"),
                Err(e) => {
                    tracing::error!("{e}");
                    break;
                }
            },
            Err(e) => println!("{e}"),
        }
    }

    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!("Shutdown: {e}");
    }
}
