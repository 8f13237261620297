// Public API
pub use connection::{read_exactly, Connection};
pub use errors::{ProtocolError, TransportError};
pub use messages::{Command, Message, Outcome};

mod connection;
mod errors;
mod messages;
