//! Ledger server entry-point: loads settings, wires adapters, and serves HTTP.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ledger::inbound::http::health::HealthState;
use ledger::inbound::http::session_config::{BuildMode, session_settings_from_env};
use ledger::outbound::persistence::{DbPool, PoolConfig};
use ledger::settings::ServerSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(std::io::Error::other)?;
    let bind_addr = settings.socket_addr().map_err(std::io::Error::other)?;
    let locale = settings.message_locale().map_err(std::io::Error::other)?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_locale(locale);
    if let Some(url) = settings.database_url() {
        let pool_config = PoolConfig::new(url).with_max_size(settings.pool_max_size);
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, ?locale, "ledger server listening");
    server.await
}
