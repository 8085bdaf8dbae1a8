//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Email, PasswordHash, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// An account with the same email already exists.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch an account by its exact email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Create an account with a fresh identifier.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when the email is
    /// taken, including when a concurrent registration wins the race.
    async fn create(
        &self,
        email: &Email,
        password_hash: &PasswordHash,
    ) -> Result<User, UserPersistenceError>;
}
