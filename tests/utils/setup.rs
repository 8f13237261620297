#![allow(dead_code)] // Test utilities may not all be used in every test

use std::sync::Arc;
use std::time::Duration;
use tokio::io::{duplex, DuplexStream};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use war::game::deal;
use war::{Connection, GameSession, Matchmaker, Message, Pairing, ServerConfig};

use super::mocks::{in_memory_network, DuplexConnector};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// A session wired to two in-memory players.
pub struct DuplexGame {
    pub session: GameSession<DuplexStream>,
    pub p1: DuplexStream,
    pub p2: DuplexStream,
}

pub fn duplex_game(io_timeout: Duration) -> DuplexGame {
    let (server1, p1) = duplex(256);
    let (server2, p2) = duplex(256);
    let session = GameSession::new(Pairing::new(
        Connection::new(server1, "p1", io_timeout),
        Connection::new(server2, "p2", io_timeout),
    ));
    DuplexGame { session, p1, p2 }
}

/// Starts a matchmaker on an ephemeral localhost port and returns its address.
pub async fn spawn_tcp_server(config: ServerConfig) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    tokio::spawn(Matchmaker::new(listener, config).serve());
    addr
}

/// Starts a matchmaker fed by an in-memory network.
pub fn spawn_in_memory_server(config: ServerConfig) -> (Arc<DuplexConnector>, JoinHandle<()>) {
    let (acceptor, connector) = in_memory_network();
    let handle = tokio::spawn(async move {
        Matchmaker::new(acceptor, config).serve().await.unwrap();
    });
    (Arc::new(connector), handle)
}

/// Starts a server that deals each connection a hand on its own, answers
/// `rounds` cards with a draw, then drops the connection.
pub async fn spawn_faulty_server(rounds: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    tokio::spawn(async move {
        loop {
            let Ok((stream, peer)) = listener.accept().await else {
                continue;
            };
            tokio::spawn(async move {
                let mut conn = Connection::new(stream, peer.to_string(), Duration::from_secs(5));
                if conn.recv_want_game().await.is_err() {
                    return;
                }
                let (hand, _) = deal(&mut rand::rng());
                if conn.send(&Message::GameStart(hand)).await.is_err() {
                    return;
                }
                for _ in 0..rounds {
                    if conn.recv_play_card().await.is_err() {
                        return;
                    }
                    let draw = Message::PlayResult(war::protocol::Outcome::Draw);
                    if conn.send(&draw).await.is_err() {
                        return;
                    }
                }
                conn.close().await;
            });
        }
    });

    addr
}
