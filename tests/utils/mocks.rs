#![allow(dead_code)] // Test utilities may not all be used in every test

use async_trait::async_trait;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{duplex, DuplexStream};
use tokio::sync::mpsc;

use war::{Acceptor, Connector};

// ============================================================================
// In-memory network
// ============================================================================

const BUFFER_SIZE: usize = 256;

/// Creates a connected acceptor/connector pair. Every `connect` hands the
/// server half of a fresh duplex pipe to the acceptor.
pub fn in_memory_network() -> (ChannelAcceptor, DuplexConnector) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (
        ChannelAcceptor {
            incoming: receiver,
            accepted: 0,
        },
        DuplexConnector {
            outgoing: sender,
            connects: AtomicUsize::new(0),
        },
    )
}

pub struct ChannelAcceptor {
    incoming: mpsc::UnboundedReceiver<DuplexStream>,
    accepted: usize,
}

#[async_trait]
impl Acceptor for ChannelAcceptor {
    type Stream = DuplexStream;

    async fn accept(&mut self) -> io::Result<Option<(DuplexStream, String)>> {
        match self.incoming.recv().await {
            Some(stream) => {
                self.accepted += 1;
                Ok(Some((stream, format!("mem-{}", self.accepted))))
            }
            None => Ok(None),
        }
    }
}

pub struct DuplexConnector {
    outgoing: mpsc::UnboundedSender<DuplexStream>,
    connects: AtomicUsize,
}

impl DuplexConnector {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for DuplexConnector {
    type Stream = DuplexStream;

    async fn connect(&self) -> io::Result<DuplexStream> {
        let (client, server) = duplex(BUFFER_SIZE);
        self.outgoing
            .send(server)
            .map_err(|_| io::Error::new(io::ErrorKind::ConnectionRefused, "server is gone"))?;
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(client)
    }

    fn endpoint(&self) -> String {
        "in-memory".to_string()
    }
}
