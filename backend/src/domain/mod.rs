//! Domain primitives, services, and ports.
//!
//! Purpose: define the ledger's strongly typed entities and the use-case
//! services that operate on them. Nothing here depends on HTTP or a database;
//! adapters reach the domain through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - UserId / Email / User and the login/registration inputs.
//! - Item and its value types, ItemFilter, LedgerSummary.
//! - LedgerService and AccountService: the driving-port implementations.
//! - Locale / Message: user-facing text.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod filter;
pub mod item;
pub mod ledger_service;
pub mod messages;
pub mod ports;
pub mod summary;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN_LENGTH, PasswordHash, Registration,
    RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::filter::{FilterEcho, FilterInput, FilterValidationError, ItemFilter};
pub use self::item::{
    Amount, Item, ItemFields, ItemId, ItemInput, ItemType, ItemValidationError, NewItem,
    UnknownItemType,
};
pub use self::ledger_service::LedgerService;
pub use self::messages::{Locale, Message, UnsupportedLocale};
pub use self::summary::LedgerSummary;
pub use self::trace_id::TraceId;
pub use self::user::{Email, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use ledger::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("missing"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
