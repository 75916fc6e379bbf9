use tokio::sync::mpsc;

use crate::sensor::{Measurement, PAYLOAD_SIZE};

/// A measurement report handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub module_id: u8,
    /// Set when the report answers a poll rather than a scheduled cycle.
    pub ack: bool,
    pub payload: [u8; PAYLOAD_SIZE],
}

impl Report {
    pub fn lux(&self) -> u16 {
        Measurement::decode(&self.payload).lux()
    }
}

/// Platform event callback. Called synchronously from the scheduler task, so
/// implementations must not block.
pub trait EventSink {
    fn deliver(&mut self, report: Report);
}

impl EventSink for mpsc::UnboundedSender<Report> {
    fn deliver(&mut self, report: Report) {
        if self.send(report).is_err() {
            tracing::warn!("Report receiver dropped");
        }
    }
}

/// Sink that only logs reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn deliver(&mut self, report: Report) {
        tracing::info!(
            module_id = report.module_id,
            ack = report.ack,
            "Report {:02x?} ({} lux)",
            report.payload,
            report.lux()
        );
    }
}
