//! Attribution tracker: per-sender tally of points given per receiver.
//!
//! The tally lives on the sender's own document, keyed by an obscured
//! encoding of the receiver name, and counts every transfer attempt that
//! reaches this stage — down-votes included, since ++/-- of the same
//! person both signal attention. Every N-th cumulative point to the same
//! receiver raises a nudge toward the peer feedback channel.

use kudos_core::notify::Notifier;
use kudos_core::text::clean_and_encode;
use kudos_core::transfer::SenderIdentity;
use kudos_store::LedgerStore;
use tracing::debug;

use crate::errors::Result;

/// Raised when a sender's tally for one receiver hits a threshold multiple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackSuggestion {
    /// Sender who keeps giving points.
    pub from: String,
    /// Receiver they keep giving them to.
    pub to: String,
    /// The tally at the moment the suggestion fired.
    pub count: i64,
}

/// Tracks points given and raises feedback suggestions.
#[derive(Clone, Debug)]
pub struct AttributionTracker {
    threshold: i64,
    peer_feedback_url: String,
}

impl AttributionTracker {
    /// Create a tracker firing every `threshold` points given to the same
    /// receiver.
    #[must_use]
    pub fn new(threshold: i64, peer_feedback_url: &str) -> Self {
        Self {
            threshold,
            peer_feedback_url: peer_feedback_url.to_owned(),
        }
    }

    /// Record one transfer from `sender` to `to_name`, persisting the
    /// sender's updated tally.
    ///
    /// The threshold check runs against the persisted post-increment
    /// count; when it fires, the sender is notified and the suggestion is
    /// returned for the surrounding system.
    pub fn record_points_given(
        &self,
        store: &LedgerStore,
        notifier: &dyn Notifier,
        sender: &SenderIdentity,
        to_name: &str,
    ) -> Result<Option<FeedbackSuggestion>> {
        let key = clean_and_encode(to_name).unwrap_or_else(|| to_name.to_owned());

        let mut sender_doc = store.get_account(&sender.name)?;
        *sender_doc.points_given.entry(key.clone()).or_insert(0) += 1;
        let persisted = store.upsert_account(&sender_doc)?;

        let count = persisted.points_given.get(&key).copied().unwrap_or(0);
        if count > 0 && count % self.threshold == 0 {
            debug!(
                from = %sender.name,
                to = to_name,
                count,
                "sender has given a lot of points, suggesting further feedback"
            );
            notifier.notify(
                &sender.id,
                &format!(
                    "Looks like you've given {to_name} quite a few points, \
                     maybe you should look at submitting {}",
                    self.peer_feedback_url
                ),
            );
            return Ok(Some(FeedbackSuggestion {
                from: sender.name.clone(),
                to: to_name.to_owned(),
                count,
            }));
        }
        Ok(None)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
