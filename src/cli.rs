use thiserror::Error;

pub const USAGE: &str = "usage: war server <host> <port>\n       war client <host> <port>\n       war clients <host> <port> <count>";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("unknown mode: {0}")]
    UnknownMode(String),
    #[error("invalid port: {0}")]
    InvalidPort(String),
    #[error("invalid client count: {0}")]
    InvalidCount(String),
    #[error("unexpected argument: {0}")]
    Unexpected(String),
}

/// What the process was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Serve games until interrupted
    Server { addr: String },
    /// Play a single game
    Client { addr: String },
    /// Play `count` games concurrently and report how many completed
    Clients { addr: String, count: usize },
}

pub fn parse_args<I>(args: I) -> Result<Mode, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mode = args.next().ok_or(UsageError::Missing("mode"))?;
    let host = args.next().ok_or(UsageError::Missing("host"))?;
    let port = args.next().ok_or(UsageError::Missing("port"))?;
    let port: u16 = port.parse().map_err(|_| UsageError::InvalidPort(port))?;
    let addr = format!("{}:{}", host, port);

    let mode = match mode.as_str() {
        "server" => Mode::Server { addr },
        "client" => Mode::Client { addr },
        "clients" => {
            let count = args.next().ok_or(UsageError::Missing("count"))?;
            let count = count
                .parse()
                .map_err(|_| UsageError::InvalidCount(count))?;
            Mode::Clients { addr, count }
        }
        _ => return Err(UsageError::UnknownMode(mode)),
    };

    match args.next() {
        Some(extra) => Err(UsageError::Unexpected(extra)),
        None => Ok(mode),
    }
}
