mod api;
mod middleware;
mod refresh;
mod scheduler;

use std::{sync::Arc, time::Duration};

use kidspots_overpass::OverpassClient;
use kidspots_store::LocationStore;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::RateLimitState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = kidspots_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        bind_addr = %config.bind_addr,
        region = %config.region.label,
        bbox = %config.region.bounds,
        overpass_url = %config.overpass_url,
        "starting kidspots-server"
    );

    let overpass = OverpassClient::with_endpoint(
        &config.overpass_url,
        config.overpass_timeout_secs,
        &config.user_agent,
    )?;

    let state = AppState {
        store: Arc::new(LocationStore::new()),
        overpass: Arc::new(overpass),
        region: Arc::new(config.region.clone()),
    };

    if config.refresh_on_startup {
        let state = state.clone();
        tokio::spawn(async move {
            scheduler::run_refresh_job(&state).await;
        });
    }

    let _scheduler = match config.refresh_cron.as_deref() {
        Some(schedule) => Some(scheduler::build_scheduler(state.clone(), schedule).await?),
        None => None,
    };

    let refresh_rate_limit =
        RateLimitState::new(config.refresh_rate_limit, Duration::from_secs(60));
    let app = build_app(state, refresh_rate_limit);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
