//! Transfer log entries and sender identity.
//!
//! Every applied score change appends one immutable [`TransferLogEntry`].
//! The log is only read back by the rate limiter's recency query.

use serde::{Deserialize, Serialize};

/// Append-only record of one applied score change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferLogEntry {
    /// Sender account name.
    pub from: String,
    /// Receiver account name.
    pub to: String,
    /// Originating room/context identifier.
    pub room: String,
    /// Raw reason text, if any.
    pub reason: Option<String>,
    /// Signed score delta that was applied.
    pub score_change: i64,
    /// Creation time, RFC 3339 UTC.
    pub created_at: String,
}

impl TransferLogEntry {
    /// Build an entry timestamped now.
    #[must_use]
    pub fn new(from: &str, to: &str, room: &str, reason: Option<&str>, score_change: i64) -> Self {
        Self {
            from: from.to_owned(),
            to: to.to_owned(),
            room: room.to_owned(),
            reason: reason.map(str::to_owned),
            score_change,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Identity of the user sending a score change, as delivered by the
/// chat host. `id` is the addressable recipient for notices (DM target);
/// `is_bot` marks automated origins for the bot-in-DM guard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderIdentity {
    /// Sender account name.
    pub name: String,
    /// Host-level recipient id for direct notices.
    pub id: String,
    /// Whether the sender is an automated identity.
    pub is_bot: bool,
}

impl SenderIdentity {
    /// Build a human sender whose id equals their name.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            id: name.to_owned(),
            is_bot: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
