//! Sender-domain census over IMAP
//!
//! Connects to a mailbox, examines the most recent messages
//! (envelopes only, never bodies), normalizes each sender address to
//! its root domain, and aggregates per-domain and per-sender counts
//! into a sorted [`Report`].
//!
//! One request is one session: LOGIN, SELECT, a single UID SEARCH,
//! then sequential envelope FETCH batches, with the mailbox released
//! and the session logged out on every exit path.

mod aggregate;
mod client;
mod config;
mod connection;
mod domain;
mod error;
mod fetch;
mod report;
mod scope;

pub use aggregate::DomainAccumulator;
pub use client::CensusClient;
pub use config::SessionConfig;
pub use domain::root_domain;
pub use error::{Error, Result};
pub use fetch::FetchOptions;
pub use report::{DomainCount, Report, SenderCount};
pub use scope::MailboxScope;
