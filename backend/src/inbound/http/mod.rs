//! HTTP inbound adapter exposing the ledger's form endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod items;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::ApiResult;
