//! Port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// The hash could not be computed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Hashes and verifies passwords. Implementations should be slow by design
/// and must not block the async executor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Whether `password` matches `hash`.
    async fn verify(&self, password: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHasherError>;
}
