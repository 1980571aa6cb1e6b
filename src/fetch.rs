//! Envelope-only message retrieval
//!
//! Walks the selected mailbox newest-first under a cap and pulls
//! sender addresses out of batched `UID FETCH` envelope responses.
//! Batches run strictly one after another: the next batch is not
//! requested until the previous one is fully drained, which bounds
//! peak memory and network burst size.

use crate::connection::ImapSession;
use crate::error::{Error, Result};
use futures::StreamExt;
use tracing::{debug, info, warn};

/// Cap on how many of the most recent messages are examined.
pub(crate) const RECENT_MESSAGE_CAP: usize = 5_000;

/// Maximum number of UIDs per FETCH request.
pub(crate) const FETCH_BATCH_SIZE: usize = 500;

/// Tunable fetch parameters, defaulting to the production constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Most recent messages to examine.
    pub recent_cap: usize,
    /// UIDs per FETCH request.
    pub batch_size: usize,
}

impl FetchOptions {
    pub(crate) const DEFAULT: Self = Self {
        recent_cap: RECENT_MESSAGE_CAP,
        batch_size: FETCH_BATCH_SIZE,
    };
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Stream sender addresses from the selected mailbox into `sink`.
///
/// Enumerates every UID, keeps the `recent_cap` highest in ascending
/// order, and fetches their envelopes (never bodies) in sequential
/// batches of at most `batch_size`. Messages whose envelope carries
/// no parseable sender are skipped with a warning; they never fail
/// the run. An empty mailbox issues no FETCH at all.
pub(crate) async fn stream_senders<F>(
    session: &mut ImapSession,
    options: FetchOptions,
    mut sink: F,
) -> Result<()>
where
    F: FnMut(&str),
{
    let uids = session
        .uid_search("ALL")
        .await
        .map_err(|e| Error::Imap(format!("Search failed: {e}")))?;

    let recent = most_recent(uids.into_iter().collect(), options.recent_cap);
    if recent.is_empty() {
        info!("Mailbox is empty, nothing to fetch");
        return Ok(());
    }

    info!(
        "Fetching envelopes for {} most recent messages",
        recent.len()
    );

    for batch in recent.chunks(options.batch_size.max(1)) {
        let uid_set = batch
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let mut messages = session
            .uid_fetch(&uid_set, "(UID ENVELOPE)")
            .await
            .map_err(|e| Error::Imap(format!("Fetch failed: {e}")))?;

        while let Some(item) = messages.next().await {
            let message = item.map_err(|e| Error::Imap(format!("Fetch error: {e}")))?;
            if let Some(address) = envelope_sender(&message) {
                sink(&address);
            } else {
                warn!(
                    "No sender address in envelope for UID {}, skipping",
                    message.uid.unwrap_or_default()
                );
            }
        }

        debug!("Drained batch of {} UIDs", batch.len());
    }

    Ok(())
}

/// The last `cap` UIDs in ascending order.
fn most_recent(mut uids: Vec<u32>, cap: usize) -> Vec<u32> {
    uids.sort_unstable();
    let start = uids.len().saturating_sub(cap);
    uids.split_off(start)
}

/// First sender address from a message's envelope, if any.
fn envelope_sender(message: &async_imap::types::Fetch) -> Option<String> {
    let envelope = message.envelope()?;
    let from = envelope.from.as_ref()?.first()?;
    let mailbox = from.mailbox.as_deref()?;
    let host = from.host.as_deref()?;

    Some(format!(
        "{}@{}",
        String::from_utf8_lossy(mailbox),
        String::from_utf8_lossy(host)
    ))
}
