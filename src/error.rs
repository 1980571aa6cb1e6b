//! Error types for domain-census
//!
//! Failures are classified into a small user-facing taxonomy at the
//! point where the underlying transport error is observed, so the
//! caller only ever sees one of these variants.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// DNS failure, refused connection, or timeout while reaching
    /// the configured server.
    #[error("Could not reach {host}: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TLS error: {0}")]
    Tls(String),

    /// Credential rejection. The message is deliberately generic and
    /// does not say which credential was wrong.
    #[error("Authentication failed: check the address and app password")]
    Auth,

    /// The scope mailbox does not exist or could not be opened.
    #[error("Mailbox {mailbox:?} not found or could not be opened{hint}")]
    MailboxSelect {
        mailbox: String,
        hint: &'static str,
    },

    /// Any other failure reported by the mail store, wrapped with the
    /// underlying message for diagnostics.
    #[error("IMAP error: {0}")]
    Imap(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
