//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::Locale;
use crate::domain::ports::{LedgerCommand, LedgerQuery, LoginService, RegistrationService};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub ledger_query: Arc<dyn LedgerQuery>,
    pub ledger_command: Arc<dyn LedgerCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub ledger_query: Arc<dyn LedgerQuery>,
    pub ledger_command: Arc<dyn LedgerCommand>,
    /// Language for messages produced by the adapter itself.
    pub locale: Locale,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle using the default locale.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use ledger::domain::{AccountService, LedgerService, Locale};
    /// use ledger::inbound::http::state::{HttpState, HttpStatePorts};
    /// use ledger::outbound::memory::{InMemoryItemRepository, InMemoryUserRepository};
    /// use ledger::outbound::password::Argon2PasswordHasher;
    ///
    /// let accounts = Arc::new(AccountService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(Argon2PasswordHasher::new()),
    /// ));
    /// let ledger = Arc::new(LedgerService::new(
    ///     Arc::new(InMemoryItemRepository::new()),
    ///     Arc::new(mockable::DefaultClock),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: accounts.clone(),
    ///     registration: accounts,
    ///     ledger_query: ledger.clone(),
    ///     ledger_command: ledger,
    /// })
    /// .with_locale(Locale::En);
    /// assert_eq!(state.locale, Locale::En);
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            ledger_query,
            ledger_command,
        } = ports;
        Self {
            login,
            registration,
            ledger_query,
            ledger_command,
            locale: Locale::default(),
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}
