use anyhow::Context;
use castweb::{cli::Cli, server, Config};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // config.yml and environment first, then flags on top
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    // Initialize tracing with configured log level; RUST_LOG wins when set
    let log_level = format!(
        "castweb={level},tower_http={level}",
        level = config.log_level
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    server::run(config).await.context("Server error")?;
    Ok(())
}
