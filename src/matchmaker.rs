use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::ServerConfig;
use crate::game::{GameSession, Pairing};
use crate::gamemanager::{GameManager, ServerError};
use crate::protocol::Connection;
use crate::transport::Acceptor;

/// Accepts connections, queues them in arrival order and pairs the two
/// oldest into a game as soon as two are waiting.
///
/// The waiting queue is touched only by the accept loop. Paired connections
/// are moved into their game and never come back.
pub struct Matchmaker<A: Acceptor> {
    acceptor: A,
    waiting: VecDeque<Connection<A::Stream>>,
    games: GameManager,
    io_timeout: Duration,
}

impl<A: Acceptor> Matchmaker<A> {
    pub fn new(acceptor: A, config: ServerConfig) -> Self {
        Self {
            acceptor,
            waiting: VecDeque::new(),
            games: GameManager::new(config.max_concurrent_games),
            io_timeout: config.io_timeout,
        }
    }

    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }

    pub fn enqueue(&mut self, connection: Connection<A::Stream>) {
        self.waiting.push_back(connection);
    }

    /// Removes the two oldest waiting connections, if there are two.
    pub fn pair_next(&mut self) -> Option<Pairing<A::Stream>> {
        if self.waiting.len() < 2 {
            return None;
        }
        let p1 = self.waiting.pop_front()?;
        let p2 = self.waiting.pop_front()?;
        Some(Pairing::new(p1, p2))
    }

    /// Runs the accept loop until the acceptor reports it is exhausted.
    /// A failed accept is logged and the loop carries on.
    #[instrument(skip_all)]
    pub async fn serve(mut self) -> Result<(), ServerError> {
        loop {
            let (stream, peer) = match self.acceptor.accept().await {
                Ok(Some(accepted)) => accepted,
                Ok(None) => {
                    info!(waiting = self.waiting(), "Acceptor closed, no longer matching");
                    return Ok(());
                }
                Err(e) => {
                    warn!(error = %e, "Failed to accept connection");
                    continue;
                }
            };

            info!(peer = %peer, "New connection");
            self.enqueue(Connection::new(stream, peer, self.io_timeout));

            if let Some(pairing) = self.pair_next() {
                let session = GameSession::new(pairing);
                debug!(game_id = %session.id(), "Paired two waiting connections");
                self.games.launch(session).await?;
            }
        }
    }
}
