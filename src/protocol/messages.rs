use std::cmp::Ordering;
use strum_macros::{Display, FromRepr};

use super::errors::ProtocolError;
use crate::game::{Card, Hand, HAND_SIZE};

/// First byte of every message on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[repr(u8)]
pub enum Command {
    #[strum(serialize = "WANTGAME")]
    WantGame = 0,
    #[strum(serialize = "GAMESTART")]
    GameStart = 1,
    #[strum(serialize = "PLAYCARD")]
    PlayCard = 2,
    #[strum(serialize = "PLAYRESULT")]
    PlayResult = 3,
}

impl Command {
    /// Total size of a message of this kind, command byte included.
    pub const fn frame_len(self) -> usize {
        match self {
            Command::GameStart => 1 + HAND_SIZE,
            Command::WantGame | Command::PlayCard | Command::PlayResult => 2,
        }
    }
}

/// Payload of a PLAYRESULT, from the receiver's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[repr(u8)]
pub enum Outcome {
    Win = 0,
    Draw = 1,
    Lose = 2,
}

impl Outcome {
    /// Outcome for the player whose card was on the left of the comparison.
    pub fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Outcome::Win,
            Ordering::Equal => Outcome::Draw,
            Ordering::Less => Outcome::Lose,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Draw => Outcome::Draw,
            Outcome::Lose => Outcome::Win,
        }
    }

    /// Contribution to a running score.
    pub fn score(self) -> i32 {
        match self {
            Outcome::Win => 1,
            Outcome::Draw => 0,
            Outcome::Lose => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    WantGame,
    GameStart(Hand),
    PlayCard(Card),
    PlayResult(Outcome),
}

impl Message {
    pub fn command(&self) -> Command {
        match self {
            Message::WantGame => Command::WantGame,
            Message::GameStart(_) => Command::GameStart,
            Message::PlayCard(_) => Command::PlayCard,
            Message::PlayResult(_) => Command::PlayResult,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let command = self.command();
        let mut frame = Vec::with_capacity(command.frame_len());
        frame.push(command as u8);
        match self {
            Message::WantGame => frame.push(0),
            Message::GameStart(hand) => frame.extend(hand.iter().map(Card::value)),
            Message::PlayCard(card) => frame.push(card.value()),
            Message::PlayResult(outcome) => frame.push(*outcome as u8),
        }
        frame
    }

    /// Decodes a complete frame that the caller expects to be of kind `expected`.
    pub fn decode(expected: Command, frame: &[u8]) -> Result<Self, ProtocolError> {
        let payload = payload_of(expected, frame)?;
        match expected {
            Command::WantGame => decode_want_game(payload[0]).map(|()| Message::WantGame),
            Command::GameStart => decode_hand(payload).map(Message::GameStart),
            Command::PlayCard => decode_card(payload[0]).map(Message::PlayCard),
            Command::PlayResult => decode_outcome(payload[0]).map(Message::PlayResult),
        }
    }
}

/// Checks the command byte and total length of `frame`, returning the payload.
/// The payload is exactly `expected.frame_len() - 1` bytes long.
pub(super) fn payload_of(expected: Command, frame: &[u8]) -> Result<&[u8], ProtocolError> {
    let Some((&command, payload)) = frame.split_first() else {
        return Err(ProtocolError::FrameLength {
            command: expected,
            expected: expected.frame_len(),
            actual: 0,
        });
    };

    if command != expected as u8 {
        return Err(ProtocolError::UnexpectedCommand {
            expected,
            found: command,
        });
    }

    if frame.len() != expected.frame_len() {
        return Err(ProtocolError::FrameLength {
            command: expected,
            expected: expected.frame_len(),
            actual: frame.len(),
        });
    }

    Ok(payload)
}

pub(super) fn decode_want_game(byte: u8) -> Result<(), ProtocolError> {
    match byte {
        0 => Ok(()),
        other => Err(ProtocolError::MalformedPayload {
            command: Command::WantGame,
            payload: other,
        }),
    }
}

pub(super) fn decode_hand(payload: &[u8]) -> Result<Hand, ProtocolError> {
    let cards = payload
        .iter()
        .map(|&value| decode_card(value))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Hand::new(cards)?)
}

pub(super) fn decode_card(byte: u8) -> Result<Card, ProtocolError> {
    Card::new(byte).map_err(|e| ProtocolError::InvalidCard(e.0))
}

pub(super) fn decode_outcome(byte: u8) -> Result<Outcome, ProtocolError> {
    Outcome::from_repr(byte).ok_or(ProtocolError::MalformedPayload {
        command: Command::PlayResult,
        payload: byte,
    })
}
