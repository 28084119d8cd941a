pub mod banner;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use std::sync::Arc;

use dispatch::{Dispatcher, TransmissionDispatcher};

pub use banner::print_banner;
pub use config::{Config, ConfigError};
pub use db::create_pool;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Run the daemon until an interrupt signal arrives.
///
/// Everything that can fail here is a startup problem, such as a data
/// directory that cannot be created or a database that will not open.
/// Once the scheduler is running, failures stay inside their cycle and
/// are logged instead of returned.
pub async fn run(config: Config) -> AppResult<()> {
    // Ensure the data directory exists before opening the ledger
    std::fs::create_dir_all(&config.data_path)?;

    let pool = create_pool(&config.database_url()).await?;

    let (username, password) = match &config.login {
        Some(login) => (Some(login.username.clone()), Some(login.password.clone())),
        None => (None, None),
    };
    let dispatcher: Arc<dyn Dispatcher> =
        Arc::new(TransmissionDispatcher::new(config.rpc_url(), username, password)?);

    // An unreachable download manager is not fatal; submissions will
    // fail per job and be retried on later cycles once it comes back.
    if let Err(e) = dispatcher.healthcheck().await {
        tracing::warn!("Download manager not reachable yet: {}", e);
    }

    let state = AppState::new(pool, config, dispatcher)?;
    tracing::info!(
        "Scheduler running {} background job(s), polling every {} seconds",
        state.scheduler.job_count(),
        state.config.update_interval
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, exiting");

    Ok(())
}
