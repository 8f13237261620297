use std::io;
use std::time::Duration;
use thiserror::Error;

use super::messages::Command;
use crate::game::HandError;

/// Failures of the byte channel itself.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("incomplete read: expected {expected} bytes, received {received}")]
    IncompleteRead { expected: usize, received: usize },

    #[error("connection reset by peer")]
    ConnectionReset,

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionReset => TransportError::ConnectionReset,
            _ => TransportError::Io(err),
        }
    }
}

/// A message that does not match what the current state expects.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("expected {expected} but received command byte {found:#04x}")]
    UnexpectedCommand { expected: Command, found: u8 },

    #[error("malformed payload {payload:#04x} for {command}")]
    MalformedPayload { command: Command, payload: u8 },

    #[error("card value {0} is outside 0..52")]
    InvalidCard(u8),

    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),

    #[error("{command} frame must be {expected} bytes, got {actual}")]
    FrameLength {
        command: Command,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ProtocolError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ProtocolError::Transport(_))
    }
}
