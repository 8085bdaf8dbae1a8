//! Server settings loaded via OrthoConfig.
//!
//! Values come from `LEDGER_*` environment variables, an optional config
//! file, and command-line flags, in OrthoConfig's usual precedence.

use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{Locale, UnsupportedLocale};
use crate::outbound::persistence::DEFAULT_MAX_SIZE;

/// Address used when `LEDGER_BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings that could not be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
    #[error(transparent)]
    InvalidLocale(#[from] UnsupportedLocale),
}

/// Runtime settings for the ledger server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LEDGER")]
pub struct ServerSettings {
    /// Socket address to listen on.
    #[ortho_config(default = String::from(DEFAULT_BIND_ADDR))]
    pub bind_addr: String,
    /// PostgreSQL URL. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = DEFAULT_MAX_SIZE)]
    pub pool_max_size: u32,
    /// Language for user-facing messages (`ja` or `en`).
    pub locale: Option<String>,
}

impl ServerSettings {
    /// The configured listen address.
    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .trim()
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }

    /// The configured database URL; blank values count as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// The configured message locale, defaulting to Japanese.
    pub fn message_locale(&self) -> Result<Locale, SettingsError> {
        match self.locale.as_deref() {
            Some(tag) if !tag.trim().is_empty() => Ok(tag.parse()?),
            _ => Ok(Locale::default()),
        }
    }
}
