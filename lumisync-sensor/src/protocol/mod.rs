mod command;
mod dispatcher;
mod reply;

pub use command::*;
pub use dispatcher::CommandProtocol;
pub use reply::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("Empty command")]
    Empty,

    #[error("Invalid length {length} for opcode {opcode}")]
    InvalidLength { opcode: u8, length: usize },

    #[error("Unknown opcode: {0}")]
    UnknownOpcode(u8),

    #[error("Reply from foreign module: {0}")]
    ForeignModule(u8),

    #[error("Unknown reply status: {0}")]
    UnknownStatus(u8),
}
