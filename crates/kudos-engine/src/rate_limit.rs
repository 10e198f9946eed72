//! Sliding-window rate limiter over the transfer log.
//!
//! A prospective transfer from A to B is abusive when any prior A→B
//! entry exists within the window. The check is re-evaluated against the
//! log on every attempt, so a limited pair becomes eligible again
//! exactly one window after their *last* applied transfer, regardless of
//! how many attempts were rejected in between. Direction matters: A→B
//! does not limit B→A.

use kudos_store::LedgerStore;
use tracing::{debug, warn};

use crate::errors::Result;

/// Rolling-window spam check for ordered sender/receiver pairs.
#[derive(Clone, Copy, Debug)]
pub struct RateLimiter {
    window_minutes: i64,
}

impl RateLimiter {
    /// Create a limiter with the configured window.
    #[must_use]
    pub fn new(window_minutes: i64) -> Self {
        Self { window_minutes }
    }

    /// Whether a transfer from `from` to `to` is currently limited.
    pub fn is_rate_limited(&self, store: &LedgerStore, to: &str, from: &str) -> Result<bool> {
        debug!(to, from, "spam check");
        let cutoff = (chrono::Utc::now() - chrono::Duration::minutes(self.window_minutes))
            .to_rfc3339();
        let recent = store.transfers_since(from, to, &cutoff)?;
        if recent > 0 {
            warn!(from, to, recent, "sender is spamming points at receiver");
            return Ok(true);
        }
        Ok(false)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use kudos_core::transfer::TransferLogEntry;

    fn store() -> LedgerStore {
        LedgerStore::open_in_memory("kudos").unwrap()
    }

    #[test]
    fn unlimited_before_any_transfer() {
        let store = store();
        let limiter = RateLimiter::new(5);
        assert!(!limiter.is_rate_limited(&store, "alice", "bob").unwrap());
    }

    #[test]
    fn limited_immediately_after_a_transfer() {
        let store = store();
        let limiter = RateLimiter::new(5);
        store
            .append_transfer(&TransferLogEntry::new("bob", "alice", "general", None, 1))
            .unwrap();
        assert!(limiter.is_rate_limited(&store, "alice", "bob").unwrap());
    }

    #[test]
    fn direction_sensitive() {
        let store = store();
        let limiter = RateLimiter::new(5);
        store
            .append_transfer(&TransferLogEntry::new("bob", "alice", "general", None, 1))
            .unwrap();
        assert!(!limiter.is_rate_limited(&store, "bob", "alice").unwrap());
    }

    #[test]
    fn unlimited_after_window_elapses() {
        let store = store();
        let limiter = RateLimiter::new(5);
        let mut entry = TransferLogEntry::new("bob", "alice", "general", None, 1);
        entry.created_at = (chrono::Utc::now() - chrono::Duration::minutes(6)).to_rfc3339();
        store.append_transfer(&entry).unwrap();
        assert!(!limiter.is_rate_limited(&store, "alice", "bob").unwrap());
    }

    #[test]
    fn last_transfer_governs_the_window() {
        let store = store();
        let limiter = RateLimiter::new(5);
        let mut old = TransferLogEntry::new("bob", "alice", "general", None, 1);
        old.created_at = (chrono::Utc::now() - chrono::Duration::minutes(20)).to_rfc3339();
        store.append_transfer(&old).unwrap();
        store
            .append_transfer(&TransferLogEntry::new("bob", "alice", "general", None, 1))
            .unwrap();
        assert!(limiter.is_rate_limited(&store, "alice", "bob").unwrap());
    }
}
