use std::sync::Arc;
use std::time::Duration;
use strum_macros::Display;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, error, instrument};

use crate::protocol::{Connection, Message, ProtocolError, TransportError};
use crate::transport::Connector;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to connect: {0}")]
    Connect(#[source] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        ClientError::Protocol(err.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Verdict {
    Won,
    Lost,
    Drew,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientReport {
    pub rounds_played: usize,
    pub score: i32,
}

impl ClientReport {
    pub fn verdict(&self) -> Verdict {
        match self.score {
            s if s > 0 => Verdict::Won,
            s if s < 0 => Verdict::Lost,
            _ => Verdict::Drew,
        }
    }
}

/// One simulated player: asks for a game and plays its hand in the order dealt.
pub struct LoadClient<C: Connector> {
    id: usize,
    connector: Arc<C>,
    io_timeout: Duration,
}

impl<C: Connector> LoadClient<C> {
    pub fn new(id: usize, connector: Arc<C>, io_timeout: Duration) -> Self {
        Self {
            id,
            connector,
            io_timeout,
        }
    }

    /// Plays one game and reports whether it ran to completion.
    /// Every failure is logged here and never reaches the caller.
    pub async fn run(&self) -> bool {
        match self.play().await {
            Ok(report) => {
                debug!(
                    client = self.id,
                    score = report.score,
                    "Game complete, I {}",
                    report.verdict()
                );
                true
            }
            Err(e) => {
                error!(client = self.id, error = %e, "Client failed");
                false
            }
        }
    }

    #[instrument(skip(self), fields(client = self.id))]
    pub async fn play(&self) -> Result<ClientReport, ClientError> {
        let stream = timeout(self.io_timeout, self.connector.connect())
            .await
            .map_err(|_| ClientError::Connect(TransportError::Timeout(self.io_timeout)))?
            .map_err(|e| ClientError::Connect(e.into()))?;
        let mut conn = Connection::new(stream, self.connector.endpoint(), self.io_timeout);

        conn.send(&Message::WantGame).await?;
        let hand = conn.recv_game_start().await?;

        let mut report = ClientReport {
            rounds_played: 0,
            score: 0,
        };
        for card in hand.iter() {
            conn.send(&Message::PlayCard(card)).await?;
            let outcome = conn.recv_play_result().await?;
            report.score += outcome.score();
            report.rounds_played += 1;
        }

        conn.close().await;
        Ok(report)
    }
}
