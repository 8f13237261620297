use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::game::{GameReport, GameSession};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("game worker pool is closed")]
    WorkerPoolClosed,
}

/// Runs each game on its own task, with at most `max_games` in flight.
#[derive(Clone)]
pub struct GameManager {
    slots: Arc<Semaphore>,
    max_games: usize,
}

impl GameManager {
    pub fn new(max_games: usize) -> Self {
        let max_games = max_games.max(1);
        Self {
            slots: Arc::new(Semaphore::new(max_games)),
            max_games,
        }
    }

    /// Number of games currently holding a worker slot
    pub fn active_games(&self) -> usize {
        self.max_games - self.slots.available_permits()
    }

    /// Waits for a free slot, then starts the session on an independent task.
    /// The slot is released when the session finishes.
    pub async fn launch<S>(
        &self,
        session: GameSession<S>,
    ) -> Result<JoinHandle<GameReport>, ServerError>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let permit = self
            .slots
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ServerError::WorkerPoolClosed)?;

        debug!(
            game_id = %session.id(),
            active_games = self.active_games(),
            "Launching game"
        );

        Ok(tokio::spawn(async move {
            let report = session.run().await;
            drop(permit);
            report
        }))
    }
}
