// Library crate for the war card game server and load-testing clients
// This file exposes the public API for the binary and integration tests

pub mod cli;
pub mod client;
pub mod config;
pub mod game;
pub mod gamemanager;
pub mod matchmaker;
pub mod protocol;
pub mod shared;
pub mod transport;

// Re-export commonly used types for easier access in tests
pub use client::{ClientPool, LoadClient};
pub use config::{PoolConfig, ServerConfig};
pub use game::{GameReport, GameSession, Pairing};
pub use gamemanager::GameManager;
pub use matchmaker::Matchmaker;
pub use protocol::{Connection, Message};
pub use shared::AppError;
pub use transport::{Acceptor, Connector, TcpConnector};
