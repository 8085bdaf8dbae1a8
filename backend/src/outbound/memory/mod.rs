//! In-process repositories used when no database is configured and by the
//! HTTP end-to-end tests.
//!
//! They honour the same contracts as the Diesel adapters: owner scoping on
//! every lookup, newest-first ordering, and unique emails.

mod in_memory_item_repository;
mod in_memory_user_repository;

pub use in_memory_item_repository::InMemoryItemRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
