use std::future::Future;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::debug;

use super::errors::{ProtocolError, TransportError};
use super::messages::{
    decode_card, decode_hand, decode_outcome, decode_want_game, payload_of, Command, Message,
    Outcome,
};
use crate::game::{Card, Hand};

/// Reads exactly `len` bytes, failing as soon as the channel reports end of stream.
pub async fn read_exactly<R>(reader: &mut R, len: usize) -> Result<Vec<u8>, TransportError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; len];
    let mut received = 0;

    while received < len {
        let n = reader.read(&mut buf[received..]).await?;
        if n == 0 {
            return Err(TransportError::IncompleteRead {
                expected: len,
                received,
            });
        }
        received += n;
    }

    Ok(buf)
}

async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T, TransportError>
where
    F: Future<Output = Result<T, TransportError>>,
{
    timeout(limit, fut)
        .await
        .map_err(|_| TransportError::Timeout(limit))?
}

/// An owned duplex channel speaking the fixed-size message protocol.
///
/// Every read and write is bounded by `io_timeout`. The connection is released
/// by [`Connection::close`], which consumes it, or by dropping it.
pub struct Connection<S> {
    stream: S,
    peer: String,
    io_timeout: Duration,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S, peer: impl Into<String>, io_timeout: Duration) -> Self {
        Self {
            stream,
            peer: peer.into(),
            io_timeout,
        }
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    pub async fn send(&mut self, message: &Message) -> Result<(), TransportError> {
        let frame = message.encode();
        let stream = &mut self.stream;
        with_timeout(self.io_timeout, async move {
            stream.write_all(&frame).await?;
            stream.flush().await?;
            Ok::<_, TransportError>(())
        })
        .await
    }

    /// Reads one frame of the expected kind and returns its payload.
    async fn recv_payload(&mut self, expected: Command) -> Result<Vec<u8>, ProtocolError> {
        let mut frame = with_timeout(
            self.io_timeout,
            read_exactly(&mut self.stream, expected.frame_len()),
        )
        .await?;
        payload_of(expected, &frame)?;
        Ok(frame.split_off(1))
    }

    pub async fn recv_want_game(&mut self) -> Result<(), ProtocolError> {
        let payload = self.recv_payload(Command::WantGame).await?;
        decode_want_game(payload[0])
    }

    pub async fn recv_game_start(&mut self) -> Result<Hand, ProtocolError> {
        let payload = self.recv_payload(Command::GameStart).await?;
        decode_hand(&payload)
    }

    pub async fn recv_play_card(&mut self) -> Result<Card, ProtocolError> {
        let payload = self.recv_payload(Command::PlayCard).await?;
        decode_card(payload[0])
    }

    pub async fn recv_play_result(&mut self) -> Result<Outcome, ProtocolError> {
        let payload = self.recv_payload(Command::PlayResult).await?;
        decode_outcome(payload[0])
    }

    /// Shuts the channel down. Failures are logged and discarded.
    pub async fn close(mut self) {
        let result = timeout(self.io_timeout, self.stream.shutdown()).await;
        match result {
            Ok(Ok(())) => debug!(peer = %self.peer, "Connection closed"),
            Ok(Err(e)) => debug!(peer = %self.peer, error = %e, "Error closing connection"),
            Err(_) => debug!(peer = %self.peer, "Timed out closing connection"),
        }
    }
}
