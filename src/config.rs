//! IMAP session configuration

use crate::error::{Error, Result};
use std::env;

/// Connection parameters for one census run.
///
/// Owned by the caller and passed by value into [`crate::CensusClient`];
/// nothing is persisted between runs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub host: String,
    pub port: u16,
    /// Connect with implicit TLS (the usual port-993 deployment).
    /// When unset the session runs over plain TCP.
    pub use_tls: bool,
    pub username: String,
    pub password: String,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// Reads from `.env` file if present. Required variables:
    /// - `IMAP_USERNAME`
    /// - `IMAP_PASSWORD`
    ///
    /// Optional (with defaults):
    /// - `IMAP_HOST` (default: `imap.gmail.com`)
    /// - `IMAP_PORT` (default: `993`)
    /// - `IMAP_TLS` (default: on; `0`, `false`, `no`, or `off` disable)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            host: env::var("IMAP_HOST").unwrap_or_else(|_| "imap.gmail.com".to_string()),
            port: env::var("IMAP_PORT")
                .unwrap_or_else(|_| "993".to_string())
                .parse()
                .map_err(|e| Error::Config(format!("Invalid IMAP_PORT: {e}")))?,
            use_tls: env::var("IMAP_TLS").map_or(true, |v| parse_toggle(&v)),
            username: env::var("IMAP_USERNAME")
                .map_err(|_| Error::Config("IMAP_USERNAME not set".into()))?,
            password: env::var("IMAP_PASSWORD")
                .map_err(|_| Error::Config("IMAP_PASSWORD not set".into()))?,
        })
    }
}

fn parse_toggle(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
