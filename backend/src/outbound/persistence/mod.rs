//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel row structs and domain types and
//! hold no business rules. Rows (`models.rs`) and the schema (`schema.rs`)
//! stay private to this module. Connections come from a `bb8` pool driven by
//! `diesel-async`.
//!
//! ```ignore
//! use ledger::outbound::persistence::{DbPool, DieselItemRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/ledger")).await?;
//! let items = DieselItemRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_item_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_item_repository::DieselItemRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
