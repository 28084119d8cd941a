use daemon::{print_banner, Config};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Fallback config location when neither the command line argument nor
/// FEEDARR_CONFIG is set.
const DEFAULT_CONFIG_PATH: &str = "/etc/feedarr.toml";

fn config_path() -> PathBuf {
    env::args()
        .nth(1)
        .or_else(|| env::var("FEEDARR_CONFIG").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    print_banner(env!("CARGO_PKG_VERSION"));

    let path = config_path();
    tracing::info!("Loading configuration from {}", path.display());
    let config = Config::load(&path).await?;

    daemon::run(config).await?;

    Ok(())
}
