pub mod config;
pub mod console;
pub mod error;
pub mod protocol;
pub mod scheduler;
pub mod sensor;
pub mod settings;
pub mod sink;
pub mod storage;

pub use error::*;

/// Identifier tagging this module's reports, replies and persisted record.
pub const MODULE_ID: u8 = 34;
