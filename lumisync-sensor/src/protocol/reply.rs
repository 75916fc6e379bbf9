use super::ProtocolError;

use crate::MODULE_ID;

pub const STATUS_OK: u8 = 0;
pub const STATUS_FAIL: u8 = 255;

/// Reply size: module id(1) + status(1)
pub const REPLY_SIZE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Fail,
}

impl Reply {
    pub fn encode(&self) -> [u8; REPLY_SIZE] {
        let status = match self {
            Self::Ok => STATUS_OK,
            Self::Fail => STATUS_FAIL,
        };
        [MODULE_ID, status]
    }

    pub fn decode(data: &[u8; REPLY_SIZE]) -> Result<Self, ProtocolError> {
        let [module_id, status] = *data;
        if module_id != MODULE_ID {
            return Err(ProtocolError::ForeignModule(module_id));
        }

        match status {
            STATUS_OK => Ok(Self::Ok),
            STATUS_FAIL => Ok(Self::Fail),
            other => Err(ProtocolError::UnknownStatus(other)),
        }
    }
}
