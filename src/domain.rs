//! Root-domain extraction for sender addresses
//!
//! Normalizes a sender address to the registrable domain it most
//! likely belongs to. This is a heuristic, not a public-suffix-list
//! lookup: a small set of well-known second-level labels combined
//! with a short final label is treated as a compound suffix, so
//! `user@mail.example.co.uk` maps to `example.co.uk` while
//! `user@mail.example.com` maps to `example.com`.

/// Second-level labels that commonly sit under country-code TLDs.
const COMPOUND_SUFFIX_LABELS: [&str; 7] = ["co", "com", "org", "net", "gov", "ac", "edu"];

/// Longest final label still treated as a country-code TLD.
const MAX_CC_TLD_LEN: usize = 3;

/// Extract the root domain from an email address.
///
/// Returns `None` when the address is empty, has no `@`, or has an
/// empty host part. A single-label host (`localhost`) is returned
/// as-is without case folding; multi-label hosts are lowercased and
/// reduced to the last two labels, or the last three when they look
/// like a compound country-code suffix.
///
/// # Examples
///
/// ```
/// use domain_census::root_domain;
///
/// assert_eq!(root_domain("a@mail.example.com").as_deref(), Some("example.com"));
/// assert_eq!(root_domain("a@example.co.uk").as_deref(), Some("example.co.uk"));
/// assert_eq!(root_domain("not-an-email"), None);
/// ```
#[must_use]
pub fn root_domain(address: &str) -> Option<String> {
    if address.is_empty() || !address.contains('@') {
        return None;
    }

    // Everything between the first and second `@`.
    let domain_part = address.split('@').nth(1)?;
    if domain_part.is_empty() {
        return None;
    }

    let lowered = domain_part.to_lowercase();
    let labels: Vec<&str> = lowered.split('.').collect();
    if labels.len() < 2 {
        return Some(domain_part.to_string());
    }

    let last = labels[labels.len() - 1];
    let second_last = labels[labels.len() - 2];
    let take = if labels.len() > 2
        && COMPOUND_SUFFIX_LABELS.contains(&second_last)
        && last.len() <= MAX_CC_TLD_LEN
    {
        3
    } else {
        2
    };

    Some(labels[labels.len() - take..].join("."))
}
