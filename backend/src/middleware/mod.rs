//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and authentication.

pub mod session_guard;
pub mod trace;

pub use session_guard::{LOGIN_PATH, RequireSession};
pub use trace::Trace;
