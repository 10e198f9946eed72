//! High-level `LedgerStore` facade.
//!
//! Wraps the connection pool and composes the repositories into the
//! narrow primitive set the engine is allowed to use: find-one, lazy
//! default synthesis, whole-row upsert-replace, atomic increments,
//! append-only log inserts, windowed recency counts, and hard deletes.
//!
//! Cross-account sequences (tip transfers, wallet debits) are **not**
//! wrapped in one transaction here; each primitive is independently
//! atomic and the engine accepts the partial-failure exposure.

use kudos_core::account::{BotWallet, UserAccount};
use kudos_core::transfer::TransferLogEntry;
use tracing::debug;

use crate::connection::{ConnectionConfig, ConnectionPool, PooledConnection, new_file, new_in_memory};
use crate::errors::{Result, StoreError};
use crate::migrations::run_migrations;
use crate::repositories::{ScoreLogRepo, ScoreRepo, WalletRepo};

/// Ledger store over a pooled `SQLite` database.
pub struct LedgerStore {
    pool: ConnectionPool,
    bot_name: String,
}

impl LedgerStore {
    /// Create a store over an existing pool, running migrations.
    pub fn new(pool: ConnectionPool, bot_name: &str) -> Result<Self> {
        let store = Self {
            pool,
            bot_name: bot_name.to_owned(),
        };
        run_migrations(&*store.conn()?, bot_name)?;
        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory(bot_name: &str) -> Result<Self> {
        Self::new(new_in_memory(&ConnectionConfig::default())?, bot_name)
    }

    /// Open a file-backed store.
    pub fn open_file(path: &str, bot_name: &str, config: &ConnectionConfig) -> Result<Self> {
        Self::new(new_file(path, config)?, bot_name)
    }

    /// The bot identity name this store was opened with (wallet key).
    #[must_use]
    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    fn conn(&self) -> Result<PooledConnection> {
        Ok(self.pool.get()?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accounts
    // ─────────────────────────────────────────────────────────────────────

    /// Find an account by name. Pure read.
    pub fn find_account(&self, name: &str) -> Result<Option<UserAccount>> {
        ScoreRepo::find(&*self.conn()?, name)
    }

    /// Get an account by name, synthesizing a fresh level-1 default when
    /// absent. The default is **not** persisted; persistence only happens
    /// when a write path upserts it. Two concurrent first-time lookups
    /// can each see a fresh default and race on first write.
    pub fn get_account(&self, name: &str) -> Result<UserAccount> {
        debug!(name, "looking up account");
        match ScoreRepo::find(&*self.conn()?, name)? {
            Some(account) => Ok(account),
            None => Ok(UserAccount::new_level_one(name)),
        }
    }

    /// Upsert the whole account row, returning the persisted document.
    pub fn upsert_account(&self, account: &UserAccount) -> Result<UserAccount> {
        ScoreRepo::upsert(&*self.conn()?, account)
    }

    /// Atomically add `delta` to an account's token balance, returning
    /// the post-update document.
    pub fn increment_account_token(&self, name: &str, delta: i64) -> Result<Option<UserAccount>> {
        ScoreRepo::increment_token(&*self.conn()?, name, delta)
    }

    /// Delete an account row entirely. Returns whether a row was removed.
    pub fn delete_account(&self, name: &str) -> Result<bool> {
        ScoreRepo::delete(&*self.conn()?, name)
    }

    /// Reset one reason's contribution on an account.
    pub fn erase_reason(&self, name: &str, reason: &str) -> Result<UserAccount> {
        ScoreRepo::erase_reason(&*self.conn()?, name, reason)?
            .ok_or_else(|| StoreError::AccountNotFound(name.to_owned()))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Leaderboards
    // ─────────────────────────────────────────────────────────────────────

    /// Top `limit` accounts by score.
    pub fn top_scores(&self, limit: i64) -> Result<Vec<UserAccount>> {
        ScoreRepo::top_scores(&*self.conn()?, limit)
    }

    /// Bottom `limit` accounts by score.
    pub fn bottom_scores(&self, limit: i64) -> Result<Vec<UserAccount>> {
        ScoreRepo::bottom_scores(&*self.conn()?, limit)
    }

    /// Top `limit` token holders.
    pub fn top_tokens(&self, limit: i64) -> Result<Vec<UserAccount>> {
        ScoreRepo::top_tokens(&*self.conn()?, limit)
    }

    /// Bottom `limit` token holders.
    pub fn bottom_tokens(&self, limit: i64) -> Result<Vec<UserAccount>> {
        ScoreRepo::bottom_tokens(&*self.conn()?, limit)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Wallet
    // ─────────────────────────────────────────────────────────────────────

    /// Read the bot wallet row.
    pub fn bot_wallet(&self) -> Result<BotWallet> {
        WalletRepo::find(&*self.conn()?, &self.bot_name)?
            .ok_or_else(|| StoreError::WalletNotFound(self.bot_name.clone()))
    }

    /// Atomically add `delta` to the wallet pool.
    pub fn increment_wallet_token(&self, delta: i64) -> Result<()> {
        if WalletRepo::increment(&*self.conn()?, &self.bot_name, delta)? {
            Ok(())
        } else {
            Err(StoreError::WalletNotFound(self.bot_name.clone()))
        }
    }

    /// Read the opaque feature-flag value stored beside the wallet.
    pub fn magic_string(&self) -> Result<Option<String>> {
        Ok(self.bot_wallet()?.magic_string)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transfer log
    // ─────────────────────────────────────────────────────────────────────

    /// Append one transfer log entry.
    pub fn append_transfer(&self, entry: &TransferLogEntry) -> Result<()> {
        ScoreLogRepo::insert(&*self.conn()?, entry)
    }

    /// Count transfers for the exact ordered `(from, to)` pair at or
    /// after `cutoff` (RFC 3339).
    pub fn transfers_since(&self, from: &str, to: &str, cutoff: &str) -> Result<u64> {
        ScoreLogRepo::count_pair_since(&*self.conn()?, from, to, cutoff)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn store() -> LedgerStore {
        LedgerStore::open_in_memory("kudos").unwrap()
    }

    #[test]
    fn get_account_synthesizes_without_persisting() {
        let store = store();
        let fresh = store.get_account("alice").unwrap();
        assert_eq!(fresh.score, 0);
        assert_eq!(fresh.account_level, 1);
        // Nothing was written.
        assert!(store.find_account("alice").unwrap().is_none());
    }

    #[test]
    fn upsert_persists_the_document() {
        let store = store();
        let mut alice = store.get_account("alice").unwrap();
        alice.apply_delta(1, Some("help"));
        let saved = store.upsert_account(&alice).unwrap();
        assert_eq!(saved.score, 1);
        assert!(store.find_account("alice").unwrap().is_some());
    }

    #[test]
    fn erase_reason_missing_account_errors() {
        let store = store();
        let err = store.erase_reason("ghost", "x").unwrap_err();
        assert_matches!(err, StoreError::AccountNotFound(_));
    }

    #[test]
    fn delete_then_lookup_is_fresh_default() {
        let store = store();
        let mut alice = store.get_account("alice").unwrap();
        alice.apply_delta(10, Some("x"));
        let _ = store.upsert_account(&alice).unwrap();

        assert!(store.delete_account("alice").unwrap());
        let fresh = store.get_account("alice").unwrap();
        assert_eq!(fresh.score, 0);
        assert_eq!(fresh.account_level, 1);
        assert!(fresh.reasons.is_empty());
    }

    #[test]
    fn wallet_is_seeded_and_movable() {
        let store = store();
        assert_eq!(store.bot_wallet().unwrap().token, 0);
        store.increment_wallet_token(250).unwrap();
        assert_eq!(store.bot_wallet().unwrap().token, 250);
    }

    #[test]
    fn magic_string_defaults_to_none() {
        let store = store();
        assert_eq!(store.magic_string().unwrap(), None);
    }

    #[test]
    fn transfer_log_roundtrip() {
        let store = store();
        let entry = TransferLogEntry::new("bob", "alice", "general", Some("help"), 1);
        store.append_transfer(&entry).unwrap();
        let count = store
            .transfers_since("bob", "alice", "2000-01-01T00:00:00+00:00")
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn file_backed_store_works() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kudos.db");
        let store = LedgerStore::open_file(
            path.to_str().unwrap(),
            "kudos",
            &ConnectionConfig::default(),
        )
        .unwrap();
        let _ = store.upsert_account(&UserAccount::new_level_one("alice")).unwrap();
        assert!(store.find_account("alice").unwrap().is_some());
    }
}
