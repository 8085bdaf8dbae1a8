//! Builders wiring repositories and services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use ledger::domain::ports::{ItemRepository, PasswordHasher, UserRepository};
use ledger::domain::{AccountService, LedgerService, Locale};
use ledger::inbound::http::state::{HttpState, HttpStatePorts};
use ledger::outbound::memory::{InMemoryItemRepository, InMemoryUserRepository};
use ledger::outbound::password::Argon2PasswordHasher;
use ledger::outbound::persistence::{DieselItemRepository, DieselUserRepository};

use super::ServerConfig;

/// Account and ledger services over one pair of repositories.
fn build_ports<U, I, H>(
    users: Arc<U>,
    items: Arc<I>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
    locale: Locale,
) -> HttpStatePorts
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    H: PasswordHasher + 'static,
{
    let accounts = Arc::new(AccountService::new(users, hasher).with_locale(locale));
    let ledger = Arc::new(LedgerService::new(items, clock).with_locale(locale));
    HttpStatePorts {
        login: accounts.clone(),
        registration: accounts,
        ledger_query: ledger.clone(),
        ledger_command: ledger,
    }
}

/// Build handler state, using PostgreSQL when a pool is configured and
/// in-memory repositories otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = match &config.db_pool {
        Some(pool) => build_ports(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselItemRepository::new(pool.clone())),
            hasher,
            clock,
            config.locale,
        ),
        None => {
            info!("no database configured; ledger data is kept in memory");
            build_ports(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryItemRepository::new()),
                hasher,
                clock,
                config.locale,
            )
        }
    };
    web::Data::new(HttpState::new(ports).with_locale(config.locale))
}
