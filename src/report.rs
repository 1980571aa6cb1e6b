//! Census report model
//!
//! The report is built once per run and handed back to the caller;
//! it is plain data with no connection state behind it.

use crate::scope::MailboxScope;
use serde::{Deserialize, Serialize};

/// Count for one exact sender address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderCount {
    pub address: String,
    pub count: u64,
}

/// Total for one root domain plus the per-sender breakdown.
///
/// `count` always equals the sum of the sender counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCount {
    pub domain: String,
    pub count: u64,
    pub senders: Vec<SenderCount>,
}

/// Outcome of one census run.
///
/// Exactly one of `domain_counts` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub domain_counts: Option<Vec<DomainCount>>,
    pub error: Option<String>,
    /// Whether the analysis covered only the primary inbox.
    pub inbox_only: bool,
}

impl Report {
    #[must_use]
    pub const fn success(domain_counts: Vec<DomainCount>, scope: MailboxScope) -> Self {
        Self {
            domain_counts: Some(domain_counts),
            error: None,
            inbox_only: scope.inbox_only(),
        }
    }

    #[must_use]
    pub const fn failure(message: String, scope: MailboxScope) -> Self {
        Self {
            domain_counts: None,
            error: Some(message),
            inbox_only: scope.inbox_only(),
        }
    }

    /// Whether the run produced aggregates.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.domain_counts.is_some()
    }
}
