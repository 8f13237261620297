use std::time::Duration;

pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_CONCURRENT_GAMES: usize = 1024;
pub const DEFAULT_ADMISSION_CAP: usize = 1000;

/// Configuration for the game server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Limit on every single read or write of a game connection
    pub io_timeout: Duration,
    /// How many games may be in flight at once
    pub max_concurrent_games: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            io_timeout: DEFAULT_IO_TIMEOUT,
            max_concurrent_games: DEFAULT_MAX_CONCURRENT_GAMES,
        }
    }
}

impl ServerConfig {
    pub fn with_io_timeout(mut self, io_timeout: Duration) -> Self {
        self.io_timeout = io_timeout;
        self
    }

    /// A limit of zero is raised to one.
    pub fn with_max_concurrent_games(mut self, max_concurrent_games: usize) -> Self {
        self.max_concurrent_games = max_concurrent_games.max(1);
        self
    }
}

/// Configuration for a pool of load clients
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// How many clients may be doing channel I/O at once
    pub admission_cap: usize,
    /// Limit on connecting and on every single read or write
    pub io_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            admission_cap: DEFAULT_ADMISSION_CAP,
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }
}

impl PoolConfig {
    /// A cap of zero is raised to one.
    pub fn with_admission_cap(mut self, admission_cap: usize) -> Self {
        self.admission_cap = admission_cap.max(1);
        self
    }

    pub fn with_io_timeout(mut self, io_timeout: Duration) -> Self {
        self.io_timeout = io_timeout;
        self
    }
}
