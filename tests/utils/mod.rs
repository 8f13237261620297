pub mod actions;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use actions::*;
#[allow(unused_imports)]
pub use mocks::{in_memory_network, ChannelAcceptor, DuplexConnector};
#[allow(unused_imports)]
pub use setup::{duplex_game, spawn_faulty_server, spawn_in_memory_server, spawn_tcp_server, DuplexGame};
