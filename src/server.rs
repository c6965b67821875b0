use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::{
    cast::{Caster, SvtplayForwarder},
    config::Config,
    error::{Error, Result},
    library::Library,
    routes::{
        browse_path, browse_root, get_listing, health, play, ytcast_list, ytcast_pair,
        ytcast_set_code,
    },
    Storage,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub library: Library,
    pub storage: Storage,
    pub caster: Caster,
    pub svtplay: Option<SvtplayForwarder>,
}

impl AppState {
    /// Wire up collaborators from configuration
    pub async fn new(config: Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.cast_timeout_seconds);

        let svtplay = config
            .svtplay_endpoint
            .as_deref()
            .map(|endpoint| SvtplayForwarder::new(endpoint, timeout))
            .transpose()?;

        Ok(Self {
            library: Library::new(config.library_path.clone()),
            storage: Storage::open(config.state_file()).await,
            caster: Caster::new(config.ytcast_binary.clone(), timeout),
            svtplay,
            config: Arc::new(config),
        })
    }
}

/// Build the router. Fixed routes take precedence over the browse wildcard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/listing", get(get_listing))
        .route("/play", get(play).post(play))
        .route("/ytcast/list", get(ytcast_list))
        .route("/ytcast/pair", get(ytcast_pair))
        .route("/ytcast/set-code", get(ytcast_set_code))
        .route("/", get(browse_root))
        .route("/*path", get(browse_path))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build and run the Axum server
pub async fn run(config: Config) -> Result<()> {
    tracing::info!("Starting castweb server");
    tracing::info!("Library path: {}", config.library_path.display());
    tracing::info!("State file: {}", config.state_file().display());
    match &config.ytcast_device {
        Some(device) => tracing::info!("ytcast device: {}", device),
        None => tracing::info!("No ytcast device configured; set one from the UI or with --ytcast"),
    }

    let addr = config.bind_addr();
    let app = router(AppState::new(config).await?);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
