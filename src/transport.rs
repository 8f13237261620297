use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};

/// Source of inbound byte-stream connections for the matchmaker.
#[async_trait]
pub trait Acceptor: Send {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    /// Waits for the next connection and a label for its peer.
    /// Returns `Ok(None)` once no further connections will ever arrive.
    async fn accept(&mut self) -> io::Result<Option<(Self::Stream, String)>>;
}

#[async_trait]
impl Acceptor for TcpListener {
    type Stream = TcpStream;

    async fn accept(&mut self) -> io::Result<Option<(TcpStream, String)>> {
        let (stream, addr) = TcpListener::accept(self).await?;
        Ok(Some((stream, addr.to_string())))
    }
}

/// Opens outbound connections to a game server.
#[async_trait]
pub trait Connector: Send + Sync {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    async fn connect(&self) -> io::Result<Self::Stream>;

    /// Label of the remote endpoint, for logging.
    fn endpoint(&self) -> String;
}

pub struct TcpConnector {
    addr: String,
}

impl TcpConnector {
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }
}

#[async_trait]
impl Connector for TcpConnector {
    type Stream = TcpStream;

    async fn connect(&self) -> io::Result<TcpStream> {
        TcpStream::connect(self.addr.as_str()).await
    }

    fn endpoint(&self) -> String {
        self.addr.clone()
    }
}
