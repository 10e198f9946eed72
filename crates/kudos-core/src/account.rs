//! Account and wallet types for the score ledger.
//!
//! A [`UserAccount`] is one document per participant name. Accounts start at
//! level 1 (score only); level 2 accounts additionally hold tokens minted
//! from the shared [`BotWallet`] pool. Levels never decrease.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Account level at which a participant starts holding tokens.
pub const TOKEN_HOLDER_LEVEL: i64 = 2;

/// One participant's ledger document.
///
/// The participant name is the natural key, case-sensitive as received
/// from chat. `reasons` and `points_given` are stored as JSON objects
/// embedded in the row, so a row upsert replaces the whole document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Participant name, unique.
    pub name: String,
    /// Accumulated score. May go negative.
    pub score: i64,
    /// Token balance. Only meaningful once `account_level >= 2`.
    pub token: Option<i64>,
    /// Account tier, starts at 1, non-decreasing.
    pub account_level: i64,
    /// Day the account was first created (RFC 3339). Set once.
    pub joined_at: String,
    /// Per-reason score attribution: reason text -> accumulated contribution.
    pub reasons: BTreeMap<String, i64>,
    /// Per-receiver transfer tally: obscured receiver key -> count sent.
    pub points_given: BTreeMap<String, i64>,
}

impl UserAccount {
    /// Create a fresh level-1 account for `name`, joined now.
    ///
    /// This only synthesizes the document in memory. Persistence happens
    /// when a write path performs its upsert.
    #[must_use]
    pub fn new_level_one(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            score: 0,
            token: None,
            account_level: 1,
            joined_at: chrono::Utc::now().to_rfc3339(),
            reasons: BTreeMap::new(),
            points_given: BTreeMap::new(),
        }
    }

    /// Apply a score delta, updating the tagged reason entry together with
    /// the score when a reason is present.
    pub fn apply_delta(&mut self, delta: i64, reason: Option<&str>) {
        self.score += delta;
        if let Some(reason) = reason {
            if !reason.is_empty() {
                *self.reasons.entry(reason.to_owned()).or_insert(0) += delta;
            }
        }
    }

    /// Whether this account participates in the token economy.
    #[must_use]
    pub fn holds_tokens(&self) -> bool {
        self.account_level >= TOKEN_HOLDER_LEVEL
    }
}

/// The shared token pool, one row per deployment keyed by bot name.
///
/// Tokens move between the wallet and accounts; they are never created
/// by transfers. The wallet is pre-provisioned at migration time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotWallet {
    /// Bot identity name, the wallet's natural key.
    pub name: String,
    /// Remaining token pool.
    pub token: i64,
    /// Opaque feature-flag value stored alongside the wallet.
    pub magic_string: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_level_one_defaults() {
        let account = UserAccount::new_level_one("matt");
        assert_eq!(account.name, "matt");
        assert_eq!(account.score, 0);
        assert_eq!(account.token, None);
        assert_eq!(account.account_level, 1);
        assert!(account.reasons.is_empty());
        assert!(account.points_given.is_empty());
        assert!(!account.joined_at.is_empty());
    }

    #[test]
    fn apply_delta_without_reason_only_moves_score() {
        let mut account = UserAccount::new_level_one("matt");
        account.apply_delta(3, None);
        assert_eq!(account.score, 3);
        assert!(account.reasons.is_empty());
    }

    #[test]
    fn apply_delta_with_reason_updates_both() {
        let mut account = UserAccount::new_level_one("matt");
        account.apply_delta(1, Some("helping out"));
        account.apply_delta(1, Some("helping out"));
        account.apply_delta(-1, Some("being late"));
        assert_eq!(account.score, 1);
        assert_eq!(account.reasons.get("helping out"), Some(&2));
        assert_eq!(account.reasons.get("being late"), Some(&-1));
    }

    #[test]
    fn apply_delta_empty_reason_is_untagged() {
        let mut account = UserAccount::new_level_one("matt");
        account.apply_delta(1, Some(""));
        assert_eq!(account.score, 1);
        assert!(account.reasons.is_empty());
    }

    #[test]
    fn score_can_go_negative() {
        let mut account = UserAccount::new_level_one("matt");
        account.apply_delta(-5, None);
        assert_eq!(account.score, -5);
    }

    #[test]
    fn holds_tokens_at_level_two() {
        let mut account = UserAccount::new_level_one("matt");
        assert!(!account.holds_tokens());
        account.account_level = TOKEN_HOLDER_LEVEL;
        assert!(account.holds_tokens());
    }

    #[test]
    fn account_serde_roundtrip() {
        let mut account = UserAccount::new_level_one("matt");
        account.apply_delta(2, Some("testing"));
        let json = serde_json::to_string(&account).unwrap();
        let back: UserAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, account);
    }

    #[test]
    fn wallet_serde_roundtrip() {
        let wallet = BotWallet {
            name: "kudos".into(),
            token: 1000,
            magic_string: Some("abc".into()),
        };
        let json = serde_json::to_string(&wallet).unwrap();
        let back: BotWallet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wallet);
    }
}
