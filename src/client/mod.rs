pub mod load_client;
pub mod pool;

pub use load_client::{ClientError, ClientReport, LoadClient, Verdict};
pub use pool::ClientPool;
