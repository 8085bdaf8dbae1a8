//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account and return its id.
    ///
    /// A taken email fails with
    /// [`ErrorCode::Conflict`](crate::domain::ErrorCode::Conflict).
    async fn register(&self, registration: &Registration) -> Result<UserId, Error>;
}
