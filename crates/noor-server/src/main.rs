mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use noor_core::AppConfig;
use noor_overpass::OverpassClient;
use noor_proximity::{
    PgVerifiedPlaceStore, ProximityService, StaticPlaceStore, VerifiedPlaceStore,
};
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::RateLimitState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = noor_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(bind_addr = %config.bind_addr, "starting noor-server");

    let pool = open_pool(&config).await?;
    let store: Arc<dyn VerifiedPlaceStore> = match &pool {
        Some(pool) => Arc::new(PgVerifiedPlaceStore::new(pool.clone())),
        None => {
            tracing::warn!("DATABASE_URL not set; serving built-in verified places");
            Arc::new(StaticPlaceStore::fallback())
        }
    };

    let overpass = OverpassClient::new(
        &config.overpass_url,
        config.overpass_timeout_secs,
        &config.overpass_user_agent,
        config.overpass_max_elements,
    )?;
    let service = ProximityService::new(
        store,
        Arc::new(overpass),
        Duration::from_secs(config.overpass_timeout_secs),
    );

    let app = build_app(
        AppState { service, pool },
        RateLimitState::per_minute(config.rate_limit_per_minute),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Build the pool lazily so an unreachable database degrades queries to the
/// seed set instead of aborting start-up.
async fn open_pool(config: &AppConfig) -> anyhow::Result<Option<PgPool>> {
    let Some(database_url) = config.database_url.as_deref() else {
        return Ok(None);
    };

    let pool_config = noor_db::PoolConfig::from_app_config(config);
    let pool = noor_db::connect_pool_lazy(database_url, pool_config)?;
    match noor_db::run_migrations(&pool).await {
        Ok(applied) => tracing::info!(applied, "database migrations up to date"),
        Err(e) => tracing::warn!(error = %e, "could not run migrations; continuing without them"),
    }

    Ok(Some(pool))
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
