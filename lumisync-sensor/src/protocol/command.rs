use super::ProtocolError;

pub const OPCODE_SET_PERIOD: u8 = 0;
pub const OPCODE_POLL: u8 = 1;
pub const OPCODE_SET_I2C: u8 = 2;

/// Inbound command: opcode(1) + operand bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Exactly one operand byte: the new period in minutes.
    SetPeriod { minutes: u8 },
    /// Operand bytes, if any, are ignored.
    Poll,
    /// The bus operand is accepted but not applied; the sensor is
    /// reinitialized on the bus it already uses.
    SetI2c { bus_index: Option<u8> },
}

impl Command {
    pub fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        let (&opcode, operand) = data.split_first().ok_or(ProtocolError::Empty)?;

        match opcode {
            OPCODE_SET_PERIOD => match operand {
                [minutes] => Ok(Self::SetPeriod { minutes: *minutes }),
                _ => Err(ProtocolError::InvalidLength {
                    opcode,
                    length: data.len(),
                }),
            },
            OPCODE_POLL => Ok(Self::Poll),
            OPCODE_SET_I2C => Ok(Self::SetI2c {
                bus_index: operand.first().copied(),
            }),
            _ => Err(ProtocolError::UnknownOpcode(opcode)),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        match *self {
            Self::SetPeriod { minutes } => vec![OPCODE_SET_PERIOD, minutes],
            Self::Poll => vec![OPCODE_POLL],
            Self::SetI2c { bus_index } => {
                let mut buffer = vec![OPCODE_SET_I2C];
                buffer.extend(bus_index);
                buffer
            }
        }
    }
}
