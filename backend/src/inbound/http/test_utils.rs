//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::web;

use crate::domain::Locale;
use crate::domain::ports::{
    MockLedgerCommand, MockLedgerQuery, MockLoginService, MockRegistrationService,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Name of the session cookie issued by [`test_session_middleware`].
pub const SESSION_COOKIE: &str = "session";

/// Session middleware for tests: fresh key per call, cookie named
/// `session`, and no `Secure` flag so plain HTTP test requests carry it.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// The `Location` header of `res`, if any.
pub fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Mocked ports for handler tests. Unconfigured mocks panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub registration: MockRegistrationService,
    pub ledger_query: MockLedgerQuery,
    pub ledger_command: MockLedgerCommand,
}

impl MockPorts {
    /// Handler state over these mocks with English messages.
    pub fn into_state(self) -> web::Data<HttpState> {
        let state = HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            ledger_query: Arc::new(self.ledger_query),
            ledger_command: Arc::new(self.ledger_command),
        })
        .with_locale(Locale::En);
        web::Data::new(state)
    }
}
