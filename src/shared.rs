use std::io;
use thiserror::Error;

use crate::cli::UsageError;
use crate::gamemanager::ServerError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Usage(#[from] UsageError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Server(#[from] ServerError),

    #[error("game did not complete")]
    GameIncomplete,
}
