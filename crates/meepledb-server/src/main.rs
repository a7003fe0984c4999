mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use meepledb_extractor::ExtractionClient;
use meepledb_scraper::ScrapeClient;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = meepledb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let is_development = matches!(config.env, meepledb_core::Environment::Development);

    let pool_config = meepledb_db::PoolConfig::from_app_config(&config);
    let pool = meepledb_db::connect_pool(&config.database_url, pool_config).await?;
    meepledb_db::run_migrations(&pool).await?;

    let scrape_key = require_key(
        config.scrape_api_key.clone(),
        "MEEPLEDB_SCRAPE_API_KEY",
        is_development,
    )?;
    let extractor_key = require_key(
        config.extractor_api_key.clone(),
        "MEEPLEDB_EXTRACTOR_API_KEY",
        is_development,
    )?;

    let scraper = ScrapeClient::with_base_url(
        &scrape_key,
        config.scrape_timeout_secs,
        &config.scrape_api_url,
    )?;
    let extractor = ExtractionClient::with_base_url(
        &extractor_key,
        &config.extractor_model,
        config.extractor_timeout_secs,
        &config.extractor_api_url,
    )?;

    let auth = AuthState::from_env(is_development)?;
    let state = AppState {
        pool,
        scraper: Arc::new(scraper),
        extractor: Arc::new(extractor),
    };
    let app = build_app(state, auth, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Resolves an optional API key from config, failing startup outside
/// development when the key is missing.
fn require_key(
    value: Option<String>,
    var: &str,
    is_development: bool,
) -> anyhow::Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ if is_development => {
            tracing::warn!("{var} not set; external calls will be unauthenticated");
            Ok(String::new())
        }
        _ => anyhow::bail!("{var} is required outside development"),
    }
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
