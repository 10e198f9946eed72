//! The `ScoreKeeper` orchestrator.
//!
//! One inbound chat event becomes one `apply_change` call. Guards are
//! evaluated in order and each is a hard veto with no partial effects:
//! self-send, bot-in-DM, then the rate limit (the only guard with a
//! user-visible notice). On pass, the receiver's document is mutated and
//! persisted, attribution is recorded on the sender, tier transitions
//! trigger the token economy, and the transfer log is appended
//! best-effort.
//!
//! Storage failures inside the guarded path are caught here, logged with
//! full context, and surface as `None` — callers observe "no change",
//! operators get the detail in logs.

use std::sync::Arc;

use kudos_core::account::UserAccount;
use kudos_core::notify::Notifier;
use kudos_core::settings::KudosSettings;
use kudos_core::text::is_private_room;
use kudos_core::transfer::{SenderIdentity, TransferLogEntry};
use kudos_store::LedgerStore;
use tracing::{debug, error, warn};

use crate::attribution::AttributionTracker;
use crate::economy::TokenEconomy;
use crate::errors::Result;
use crate::rate_limit::RateLimiter;

/// Orchestrates score changes against the ledger store.
pub struct ScoreKeeper {
    store: LedgerStore,
    settings: KudosSettings,
    notifier: Arc<dyn Notifier>,
    limiter: RateLimiter,
    economy: TokenEconomy,
    tracker: AttributionTracker,
}

impl ScoreKeeper {
    /// Build a keeper from its collaborators. All configuration comes in
    /// through `settings`; there is no ambient state.
    #[must_use]
    pub fn new(store: LedgerStore, settings: KudosSettings, notifier: Arc<dyn Notifier>) -> Self {
        let limiter = RateLimiter::new(settings.spam_window_minutes);
        let tracker = AttributionTracker::new(
            settings.further_feedback_suggested_score,
            &settings.peer_feedback_url,
        );
        Self {
            store,
            settings,
            notifier,
            limiter,
            economy: TokenEconomy,
            tracker,
        }
    }

    /// The underlying ledger store.
    #[must_use]
    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Apply a proposed score change to `to_name` from `sender`.
    ///
    /// Returns the final persisted (and possibly token-adjusted) account,
    /// or `None` when a guard vetoed the change or a storage failure was
    /// caught at this boundary.
    pub fn apply_change(
        &self,
        to_name: &str,
        sender: &SenderIdentity,
        room: &str,
        reason: Option<&str>,
        delta: i64,
    ) -> Option<UserAccount> {
        match self.try_apply(to_name, sender, room, reason, delta) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    to = to_name,
                    from = %sender.name,
                    ?reason,
                    delta,
                    error = %e,
                    "failed to apply score change"
                );
                None
            }
        }
    }

    fn try_apply(
        &self,
        to_name: &str,
        sender: &SenderIdentity,
        room: &str,
        reason: Option<&str>,
        delta: i64,
    ) -> Result<Option<UserAccount>> {
        // 1. Self-send guard: silent veto.
        if to_name == sender.name {
            debug!(name = to_name, "ignoring self-send");
            return Ok(None);
        }

        // 2. Bot-in-DM guard: automated senders can't farm points in
        //    private contexts.
        if sender.is_bot && is_private_room(room) {
            warn!(from = %sender.name, room, "a bot is sending points in a DM");
            return Ok(None);
        }

        // 3. Rate-limit guard: the only guard with a user-visible notice.
        if self
            .limiter
            .is_rate_limited(&self.store, to_name, &sender.name)?
        {
            self.notifier.notify(&sender.id, &self.settings.spam_message);
            return Ok(None);
        }

        // 4. Mutate the receiver's document: score and tagged reason move
        //    together.
        let mut to_user = self.store.get_account(to_name)?;
        to_user.apply_delta(delta, reason);

        // 5. Record attribution on the sender (may emit a feedback nudge).
        let _ = self
            .tracker
            .record_points_given(&self.store, self.notifier.as_ref(), sender, to_name)?;

        // 6. Persist the receiver; tier transitions key off the persisted
        //    document's level, not the pre-update value.
        let saved = self.store.upsert_account(&to_user)?;
        let final_user = if saved.account_level > 1 {
            self.economy
                .transfer_tokens(&self.store, to_name, delta, Some(&sender.name))?
        } else {
            saved
        };

        // 7. Append the transfer log, best-effort: a logging failure does
        //    not unwind the already-applied score change.
        let entry = TransferLogEntry::new(&sender.name, to_name, room, reason, delta);
        if let Err(e) = self.store.append_transfer(&entry) {
            error!(
                to = to_name,
                from = %sender.name,
                room,
                error = %e,
                "failed to append transfer log entry"
            );
        }

        debug!(
            to = to_name,
            score = final_user.score,
            ?reason,
            "score change applied"
        );
        Ok(Some(final_user))
    }

    /// Promote an account to level 2 (see [`TokenEconomy::promote_to_level_two`]).
    pub fn promote_to_level_two(&self, name: &str) -> Result<UserAccount> {
        self.economy.promote_to_level_two(&self.store, name)
    }

    /// Erase score state for an account.
    ///
    /// With a reason: removes that one reason's contribution from the
    /// score and zeroes its entry, leaving the rest of the document
    /// intact. Without: deletes the account row entirely, so the next
    /// lookup recreates a fresh level-1 default.
    pub fn erase(&self, name: &str, reason: Option<&str>) -> Result<()> {
        match reason {
            Some(reason) => {
                warn!(name, reason, "erasing score for reason");
                let _ = self.store.erase_reason(name, reason)?;
            }
            None => {
                warn!(name, "erasing all scores");
                let _ = self.store.delete_account(name)?;
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
