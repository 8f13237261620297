use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, instrument};

use super::load_client::LoadClient;
use crate::config::PoolConfig;
use crate::transport::Connector;

/// Runs many load clients against one server behind an admission gate.
pub struct ClientPool<C: Connector> {
    connector: Arc<C>,
    config: PoolConfig,
}

impl<C: Connector> ClientPool<C> {
    pub fn new(connector: Arc<C>, config: PoolConfig) -> Self {
        Self { connector, config }
    }

    /// Starts `count` clients, lets at most `admission_cap` of them talk to
    /// the server at once, and returns how many completed their game.
    ///
    /// All clients are polled from the calling task; waiting at the gate
    /// costs no thread.
    #[instrument(skip(self), fields(endpoint = %self.connector.endpoint()))]
    pub async fn run(&self, count: usize) -> usize {
        let gate = Semaphore::new(self.config.admission_cap.max(1));
        let gate = &gate;

        let mut clients: FuturesUnordered<_> = (0..count)
            .map(|id| {
                let client = LoadClient::new(id, self.connector.clone(), self.config.io_timeout);
                async move {
                    let Ok(_permit) = gate.acquire().await else {
                        return false;
                    };
                    client.run().await
                }
            })
            .collect();

        let mut completed = 0;
        while let Some(succeeded) = clients.next().await {
            if succeeded {
                completed += 1;
            }
        }

        info!(completed, requested = count, "Completed clients");
        completed
    }
}
