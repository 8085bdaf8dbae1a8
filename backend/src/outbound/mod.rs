//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM.
//! - **memory**: in-process repositories for development and tests.
//! - **password**: Argon2id password hashing.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod password;
pub mod persistence;
