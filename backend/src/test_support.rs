//! Test utilities shared with integration tests under `tests/`.
//!
//! Compiled only with the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use argon2::Params;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::Trace;
use crate::domain::{AccountService, LedgerService, Locale};
use crate::inbound::http::auth::configure_auth;
use crate::inbound::http::items::configure_items;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryItemRepository, InMemoryUserRepository};
use crate::outbound::password::Argon2PasswordHasher;

/// Clock whose time only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// In-memory ledger wired exactly like the server, with cheap password
/// hashing and a controllable clock.
pub struct TestLedger {
    pub clock: Arc<MutableClock>,
    pub users: Arc<InMemoryUserRepository>,
    pub items: Arc<InMemoryItemRepository>,
    pub state: web::Data<HttpState>,
}

impl TestLedger {
    pub fn new(start: DateTime<Utc>, locale: Locale) -> Self {
        let clock = Arc::new(MutableClock::new(start));
        let users = Arc::new(InMemoryUserRepository::new());
        let items = Arc::new(InMemoryItemRepository::new());
        let hasher = Arc::new(cheap_hasher());

        let accounts =
            Arc::new(AccountService::new(users.clone(), hasher).with_locale(locale));
        let ledger = Arc::new(
            LedgerService::new(items.clone(), clock.clone() as Arc<dyn Clock>).with_locale(locale),
        );
        let state = HttpState::new(HttpStatePorts {
            login: accounts.clone(),
            registration: accounts,
            ledger_query: ledger.clone(),
            ledger_command: ledger,
        })
        .with_locale(locale);

        Self {
            clock,
            users,
            items,
            state: web::Data::new(state),
        }
    }

    /// The full application: tracing, cookie sessions, auth and items.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_name(SESSION_COOKIE.to_owned())
            .cookie_secure(false)
            .build();
        App::new()
            .app_data(self.state.clone())
            .wrap(session)
            .wrap(Trace)
            .configure(configure_auth)
            .configure(configure_items)
    }
}

/// Session cookie name used by [`TestLedger::app`].
pub const SESSION_COOKIE: &str = "session";

fn cheap_hasher() -> Argon2PasswordHasher {
    match Params::new(Params::MIN_M_COST, 1, 1, None) {
        Ok(params) => Argon2PasswordHasher::with_params(params),
        Err(_) => Argon2PasswordHasher::new(),
    }
}
