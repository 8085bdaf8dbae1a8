//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod item_repository;
mod ledger_command;
mod ledger_query;
mod login_service;
mod password_hasher;
mod registration_service;
mod user_repository;

#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{ItemRepository, ItemRepositoryError};
#[cfg(test)]
pub use ledger_command::MockLedgerCommand;
pub use ledger_command::LedgerCommand;
#[cfg(test)]
pub use ledger_query::MockLedgerQuery;
pub use ledger_query::{ItemListing, LedgerQuery};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
