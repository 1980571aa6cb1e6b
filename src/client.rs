//! Census client driving the session lifecycle
//!
//! One `collect` call owns one IMAP session: connect, authenticate,
//! select the scope mailbox, drain sender envelopes into the
//! aggregator, then CLOSE and LOGOUT. The release steps run once on
//! every exit path; their failures are logged and never displace the
//! primary result.

use crate::aggregate::DomainAccumulator;
use crate::config::SessionConfig;
use crate::connection::{self, ImapSession};
use crate::error::Result;
use crate::fetch::{self, FetchOptions};
use crate::report::{DomainCount, Report};
use crate::scope::MailboxScope;
use tracing::{info, warn};

/// Sender-domain census over a single IMAP account.
///
/// The client holds no connection state; every call to
/// [`CensusClient::collect`] or [`CensusClient::analyze`] opens and
/// tears down its own session, so concurrent runs are independent.
pub struct CensusClient {
    config: SessionConfig,
    options: FetchOptions,
}

impl CensusClient {
    #[must_use]
    pub const fn new(config: SessionConfig) -> Self {
        Self {
            config,
            options: FetchOptions::DEFAULT,
        }
    }

    /// Client with non-default fetch limits.
    #[must_use]
    pub const fn with_options(config: SessionConfig, options: FetchOptions) -> Self {
        Self { config, options }
    }

    /// Run the census and fold the outcome into a [`Report`].
    ///
    /// Never fails: errors are carried in the report's `error` field.
    pub async fn analyze(&self, scope: MailboxScope) -> Report {
        match self.collect(scope).await {
            Ok(domain_counts) => Report::success(domain_counts, scope),
            Err(e) => {
                warn!("Census over {} failed: {}", scope, e);
                Report::failure(e.to_string(), scope)
            }
        }
    }

    /// Run the census, returning the sorted aggregates.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection, LOGIN, SELECT, SEARCH, or
    /// any FETCH batch fails. The mailbox is released and the session
    /// logged out before the error is surfaced; no partial aggregates
    /// are returned.
    pub async fn collect(&self, scope: MailboxScope) -> Result<Vec<DomainCount>> {
        let mut session = connection::connect(&self.config).await?;

        let outcome = match connection::select(&mut session, scope).await {
            Ok(()) => {
                let outcome = self.drain(&mut session).await;
                // Release the mailbox before logout, even when the
                // fetch phase failed mid-batch.
                if let Err(e) = session.close().await {
                    warn!("Failed to close mailbox {}: {}", scope, e);
                }
                outcome
            }
            Err(e) => Err(e),
        };

        if let Err(e) = session.logout().await {
            warn!("Logout failed: {}", e);
        }

        outcome
    }

    async fn drain(&self, session: &mut ImapSession) -> Result<Vec<DomainCount>> {
        let mut accumulator = DomainAccumulator::new();
        fetch::stream_senders(session, self.options, |address| {
            accumulator.record(address);
        })
        .await?;

        info!("Aggregated {} domains", accumulator.domain_count());
        Ok(accumulator.finish())
    }
}
