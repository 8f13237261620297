use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use war::cli::{self, Mode, USAGE};
use war::{AppError, ClientPool, LoadClient, Matchmaker, PoolConfig, ServerConfig, TcpConnector};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "war=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Usage(e)) => {
            eprintln!("{}\n{}", e, USAGE);
            ExitCode::from(2)
        }
        Err(e) => {
            error!(error = %e, "Exiting");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    match cli::parse_args(std::env::args().skip(1))? {
        Mode::Server { addr } => serve(addr).await,
        Mode::Client { addr } => {
            let config = PoolConfig::default();
            let client = LoadClient::new(0, Arc::new(TcpConnector::new(addr)), config.io_timeout);
            client_result(client.run().await)
        }
        Mode::Clients { addr, count } => {
            let pool = ClientPool::new(Arc::new(TcpConnector::new(addr)), PoolConfig::default());
            pool.run(count).await;
            Ok(())
        }
    }
}

/// A single-game client only succeeds if its game completed
fn client_result(completed: bool) -> Result<(), AppError> {
    if completed {
        Ok(())
    } else {
        Err(AppError::GameIncomplete)
    }
}

async fn serve(addr: String) -> Result<(), AppError> {
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("Server listening on {}", addr);

    let matchmaker = Matchmaker::new(listener, ServerConfig::default());
    tokio::select! {
        result = matchmaker.serve() => result?,
        _ = tokio::signal::ctrl_c() => info!("Interrupted, shutting down"),
    }
    Ok(())
}
