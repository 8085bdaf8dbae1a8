//! Authentication primitives: login credentials, registration requests, and
//! stored password hashes.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::messages::Message;
use super::user::Email;

/// Minimum password length accepted at registration, counted in characters.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl LoginValidationError {
    /// User-facing message for this failure.
    pub fn message(&self) -> Message {
        Message::LoginFieldsRequired
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use ledger::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice@example.com ", "secret").unwrap();
/// assert_eq!(creds.email().as_str(), "alice@example.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email).map_err(|_| LoginValidationError::EmptyEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Reasons a registration form is rejected before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error("email, password, and confirmation are required")]
    MissingFields,
    #[error("password confirmation does not match")]
    PasswordMismatch,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

impl RegistrationValidationError {
    /// User-facing message for this failure.
    pub fn message(&self) -> Message {
        match self {
            Self::MissingFields => Message::RegisterFieldsRequired,
            Self::PasswordMismatch => Message::PasswordMismatch,
            Self::PasswordTooShort { .. } => Message::PasswordTooShort,
        }
    }
}

/// Validated registration request.
///
/// Checks run in a fixed order: every field present, confirmation matches,
/// then the length rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: Email,
    password: Zeroizing<String>,
}

impl Registration {
    pub fn try_from_parts(
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let email = Email::new(email).map_err(|_| RegistrationValidationError::MissingFields)?;
        if password.is_empty() || confirm_password.is_empty() {
            return Err(RegistrationValidationError::MissingFields);
        }
        if password != confirm_password {
            return Err(RegistrationValidationError::PasswordMismatch);
        }
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(RegistrationValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Password hash in PHC string format.
///
/// The value is opaque to the domain; only a
/// [`PasswordHasher`](crate::domain::ports::PasswordHasher) interprets it.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
