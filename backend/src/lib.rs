//! Personal income and expense ledger.
//!
//! The crate follows a hexagonal layout: [`domain`] holds value types,
//! services and ports; [`inbound`] adapts HTTP requests to the driving ports;
//! [`outbound`] implements the driven ports over PostgreSQL, memory, and
//! Argon2; [`middleware`] carries request tracing and the session guard.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use middleware::Trace;
