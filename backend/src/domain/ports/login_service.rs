//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing infrastructure, so handler tests can substitute a test double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown emails and wrong passwords fail identically with
    /// [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized).
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
