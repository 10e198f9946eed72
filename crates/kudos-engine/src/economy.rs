//! Two-tier token economy: level-up minting and the wallet transfer
//! primitive.
//!
//! Tokens ultimately originate from the shared wallet, so the wallet is
//! debited on every transfer — even user-to-user tips, where the sender
//! is *additionally* debited. That asymmetry is the committed economic
//! model, not an accounting bug; see the tests covering it before
//! changing anything here.
//!
//! The steps below are each atomic at the row level but are not wrapped
//! in one transaction; a failure mid-sequence can leave the wallet
//! debited without the receiver credited. That exposure is reported via
//! logs, not compensated.

use kudos_core::account::UserAccount;
use kudos_core::text::capitalize_first;
use kudos_store::{LedgerStore, StoreError};
use tracing::{debug, info};

use crate::errors::Result;

/// Token economy operations over the ledger store.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenEconomy;

impl TokenEconomy {
    /// Move `amount` tokens into `to`'s account.
    ///
    /// The wallet pool is debited `amount` regardless of counter-party.
    /// When `from` is named and `|amount| > 1` (a tip rather than a
    /// routine ±1 vote), the sender's balance is additionally debited
    /// `amount`. Returns the receiver's post-credit document.
    pub fn transfer_tokens(
        &self,
        store: &LedgerStore,
        to: &str,
        amount: i64,
        from: Option<&str>,
    ) -> Result<UserAccount> {
        let bot_display = capitalize_first(store.bot_name());
        info!(
            to,
            amount,
            from = from.unwrap_or(&bot_display),
            "transferring {bot_display} tokens"
        );

        let updated = store
            .increment_account_token(to, amount)?
            .ok_or_else(|| StoreError::AccountNotFound(to.to_owned()))?;
        store.increment_wallet_token(-amount)?;

        // A tip also costs the sender directly; ±1 votes leave the
        // sender's balance untouched.
        if let Some(from) = from {
            if amount.abs() > 1 {
                let _ = store.increment_account_token(from, -amount)?;
            }
        }

        Ok(updated)
    }

    /// Promote an account to level 2, minting its accumulated score into
    /// tokens from the wallet.
    ///
    /// Promoting an account already at level 2 is a benign no-op: logged
    /// as unusual, returns the current document unchanged.
    pub fn promote_to_level_two(&self, store: &LedgerStore, name: &str) -> Result<UserAccount> {
        let Some(mut account) = store.find_account(name)? else {
            return Err(StoreError::AccountNotFound(name.to_owned()).into());
        };

        if account.account_level == 2 {
            debug!(name, "account is already level 2, ignoring promotion");
            return Ok(account);
        }

        account.account_level = 2;
        account.token = Some(0);
        let tokens_to_mint = account.score;
        let _ = store.upsert_account(&account)?;

        self.transfer_tokens(store, name, tokens_to_mint, None)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
