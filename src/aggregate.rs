//! Two-level sender aggregation
//!
//! Counts observed sender addresses per root domain, then per exact
//! address within each domain. `finish` produces report rows in
//! descending count order; equal counts fall back to lexicographic
//! order so repeated runs over the same mailbox give identical
//! output.

use crate::domain::root_domain;
use crate::report::{DomainCount, SenderCount};
use std::collections::HashMap;

#[derive(Debug, Default)]
struct DomainEntry {
    total: u64,
    senders: HashMap<String, u64>,
}

/// Incremental accumulator fed one sender address at a time.
#[derive(Debug, Default)]
pub struct DomainAccumulator {
    domains: HashMap<String, DomainEntry>,
}

impl DomainAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observed sender address.
    ///
    /// Addresses with no resolvable root domain are ignored and do
    /// not affect any count. Returns whether the address was counted.
    pub fn record(&mut self, address: &str) -> bool {
        let Some(domain) = root_domain(address) else {
            return false;
        };

        let entry = self.domains.entry(domain).or_default();
        entry.total += 1;
        *entry.senders.entry(address.to_string()).or_insert(0) += 1;
        true
    }

    /// Number of distinct domains seen so far.
    #[must_use]
    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    /// Consume the accumulator and produce sorted report rows.
    ///
    /// Domains are ordered by total count descending, senders within
    /// a domain by count descending; ties order by name ascending.
    #[must_use]
    pub fn finish(self) -> Vec<DomainCount> {
        let mut rows: Vec<DomainCount> = self
            .domains
            .into_iter()
            .map(|(domain, entry)| {
                let mut senders: Vec<SenderCount> = entry
                    .senders
                    .into_iter()
                    .map(|(address, count)| SenderCount { address, count })
                    .collect();
                senders
                    .sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.address.cmp(&b.address)));

                DomainCount {
                    domain,
                    count: entry.total,
                    senders,
                }
            })
            .collect();

        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.domain.cmp(&b.domain)));
        rows
    }
}
