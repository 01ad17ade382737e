//! Backend entry-point: loads settings, prepares persistence and serves the API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use wasteflow::inbound::http::health::HealthState;
use wasteflow::inbound::http::session_config::fingerprint::key_fingerprint;
use wasteflow::inbound::http::session_config::{BuildMode, session_settings_from_env};
use wasteflow::outbound::persistence::{DbPool, PoolConfig, migrate};
use wasteflow::server::{ServerConfig, create_server};
use wasteflow::settings::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|e| io::Error::other(e.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_history_days(settings.seed_history_days());

    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations() {
            let applied = migrate(database_url.to_owned())
                .await
                .map_err(io::Error::other)?;
            info!(applied, "database migrations complete");
        }
        let pool_config = PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
        let pool = DbPool::new(pool_config)
            .await
            .map_err(io::Error::other)?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database configured; state is kept in memory and lost on restart");
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(wasteflow::server::make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    health_state.mark_ready();
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
