//! Account service: login and registration over the user repository and a
//! password hasher.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    LoginService, PasswordHasher, PasswordHasherError, RegistrationService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Error, Locale, LoginCredentials, Message, PasswordHash, Registration, UserId,
};

/// Hashed once and verified against when a login names an unknown email, so
/// both failure paths pay for one hash verification.
const DECOY_PASSWORD: &str = "ledger-decoy-password";

/// Implements [`LoginService`] and [`RegistrationService`].
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    decoy: Arc<OnceCell<PasswordHash>>,
    locale: Locale,
}

impl<U, H> AccountService<U, H> {
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self {
            users,
            hasher,
            decoy: Arc::new(OnceCell::new()),
            locale: Locale::default(),
        }
    }

    /// Use `locale` for user-facing messages.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    fn map_user_error(&self, error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { .. } => self.email_taken(),
        }
    }

    /// Burn one verification against the decoy hash. Failures are ignored;
    /// the caller rejects the login either way.
    async fn verify_decoy(&self, password: &str) {
        let decoy = self
            .decoy
            .get_or_try_init(|| self.hasher.hash(DECOY_PASSWORD))
            .await;
        let outcome = match decoy {
            Ok(hash) => self.hasher.verify(password, hash).await.map(|_| ()),
            Err(err) => Err(err),
        };
        if let Err(err) = outcome {
            debug!(error = %err, "decoy password verification failed");
        }
    }

    fn map_hasher_error(error: PasswordHasherError) -> Error {
        Error::internal(error.to_string())
    }

    fn localized(&self, message: Message) -> String {
        message.text(self.locale).to_owned()
    }

    fn invalid_credentials(&self) -> Error {
        let message = Message::InvalidCredentials;
        Error::unauthorized(self.localized(message)).with_details(json!({ "code": message.code() }))
    }

    fn email_taken(&self) -> Error {
        let message = Message::EmailAlreadyRegistered;
        Error::conflict(self.localized(message)).with_details(json!({ "code": message.code() }))
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(|err| self.map_user_error(err))?
        else {
            self.verify_decoy(credentials.password()).await;
            warn!("login attempt for unknown email");
            return Err(self.invalid_credentials());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(Self::map_hasher_error)?;
        if !matches {
            warn!(user_id = %user.id(), "login attempt with wrong password");
            return Err(self.invalid_credentials());
        }

        info!(user_id = %user.id(), "user logged in");
        Ok(user.id().clone())
    }
}

#[async_trait]
impl<U, H> RegistrationService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: &Registration) -> Result<UserId, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(|err| self.map_user_error(err))?;
        if existing.is_some() {
            return Err(self.email_taken());
        }

        let hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(Self::map_hasher_error)?;
        let user = self
            .users
            .create(registration.email(), &hash)
            .await
            .map_err(|err| self.map_user_error(err))?;

        info!(user_id = %user.id(), "user registered");
        Ok(user.id().clone())
    }
}
