//! Mailbox scope selection
//!
//! The census runs against exactly one of two fixed mailboxes: the
//! primary inbox, or the provider's full archive ("All Mail" on
//! Gmail-style servers). Arbitrary folder names are deliberately not
//! supported.

use std::fmt;

/// Which mailbox a census run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MailboxScope {
    /// Only the primary inbox.
    Inbox,
    /// The full archive mailbox, covering every non-deleted message.
    AllMail,
}

impl MailboxScope {
    /// The IMAP mailbox name this scope selects.
    #[must_use]
    pub const fn mailbox_name(self) -> &'static str {
        match self {
            Self::Inbox => "INBOX",
            Self::AllMail => "[Gmail]/All Mail",
        }
    }

    /// Guidance appended to a select failure for this scope.
    pub(crate) const fn select_hint(self) -> &'static str {
        match self {
            Self::Inbox => "",
            Self::AllMail => " (make sure the archive mailbox is visible over IMAP)",
        }
    }

    /// Whether this scope is limited to the primary inbox.
    #[must_use]
    pub const fn inbox_only(self) -> bool {
        matches!(self, Self::Inbox)
    }

    /// Scope from the caller's "inbox only" toggle.
    #[must_use]
    pub const fn from_inbox_only(inbox_only: bool) -> Self {
        if inbox_only { Self::Inbox } else { Self::AllMail }
    }
}

impl fmt::Display for MailboxScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mailbox_name())
    }
}
