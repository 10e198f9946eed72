//! Scores repository — one row per participant, whole-row upserts.
//!
//! The `reasons` and `points_given` maps are JSON objects embedded in the
//! row, which keeps an upsert equivalent to a whole-document replace:
//! two concurrent upserts on the same name cannot interleave field by
//! field, but the last writer wins.

use std::collections::BTreeMap;

use kudos_core::account::UserAccount;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::errors::Result;

const ACCOUNT_COLUMNS: &str = "name, score, token, account_level, joined_at, reasons, points_given";

fn parse_map(idx: usize, json: &str) -> rusqlite::Result<BTreeMap<String, i64>> {
    serde_json::from_str(json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Scores repository — stateless, every method takes `&Connection`.
pub struct ScoreRepo;

impl ScoreRepo {
    /// Map a full scores row to a [`UserAccount`].
    fn map_row(row: &Row<'_>) -> rusqlite::Result<UserAccount> {
        let reasons_json: String = row.get(5)?;
        let points_given_json: String = row.get(6)?;
        Ok(UserAccount {
            name: row.get(0)?,
            score: row.get(1)?,
            token: row.get(2)?,
            account_level: row.get(3)?,
            joined_at: row.get(4)?,
            reasons: parse_map(5, &reasons_json)?,
            points_given: parse_map(6, &points_given_json)?,
        })
    }

    /// Find an account by name.
    pub fn find(conn: &Connection, name: &str) -> Result<Option<UserAccount>> {
        let account = conn
            .query_row(
                &format!("SELECT {ACCOUNT_COLUMNS} FROM scores WHERE name = ?1"),
                params![name],
                Self::map_row,
            )
            .optional()?;
        Ok(account)
    }

    /// Upsert the whole row, returning the post-update account.
    ///
    /// Every column is replaced from the caller's document; this is the
    /// last-writer-wins replace primitive the engine builds on.
    pub fn upsert(conn: &Connection, account: &UserAccount) -> Result<UserAccount> {
        let reasons = serde_json::to_string(&account.reasons)?;
        let points_given = serde_json::to_string(&account.points_given)?;
        let updated = conn.query_row(
            &format!(
                "INSERT INTO scores ({ACCOUNT_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(name) DO UPDATE SET
                     score = excluded.score,
                     token = excluded.token,
                     account_level = excluded.account_level,
                     joined_at = excluded.joined_at,
                     reasons = excluded.reasons,
                     points_given = excluded.points_given
                 RETURNING {ACCOUNT_COLUMNS}"
            ),
            params![
                account.name,
                account.score,
                account.token,
                account.account_level,
                account.joined_at,
                reasons,
                points_given,
            ],
            Self::map_row,
        )?;
        Ok(updated)
    }

    /// Atomically add `delta` to the account's token balance, returning
    /// the post-update row. `None` when no such account exists.
    pub fn increment_token(
        conn: &Connection,
        name: &str,
        delta: i64,
    ) -> Result<Option<UserAccount>> {
        let updated = conn
            .query_row(
                &format!(
                    "UPDATE scores SET token = COALESCE(token, 0) + ?2
                     WHERE name = ?1
                     RETURNING {ACCOUNT_COLUMNS}"
                ),
                params![name, delta],
                Self::map_row,
            )
            .optional()?;
        Ok(updated)
    }

    /// Remove one reason's contribution: `score -= reasons[reason]` and
    /// the reason entry is reset to 0. Other reasons and all other
    /// columns stay untouched. `None` when no such account exists.
    pub fn erase_reason(
        conn: &Connection,
        name: &str,
        reason: &str,
    ) -> Result<Option<UserAccount>> {
        let Some(mut account) = Self::find(conn, name)? else {
            return Ok(None);
        };
        let contribution = account.reasons.get(reason).copied().unwrap_or(0);
        account.score -= contribution;
        let _ = account.reasons.insert(reason.to_owned(), 0);
        let reasons = serde_json::to_string(&account.reasons)?;
        let _ = conn.execute(
            "UPDATE scores SET score = ?2, reasons = ?3 WHERE name = ?1",
            params![name, account.score, reasons],
        )?;
        Ok(Some(account))
    }

    /// Delete an account row entirely. Returns whether a row was removed.
    pub fn delete(conn: &Connection, name: &str) -> Result<bool> {
        let removed = conn.execute("DELETE FROM scores WHERE name = ?1", params![name])?;
        Ok(removed > 0)
    }

    /// Top `limit` accounts by score.
    pub fn top_scores(conn: &Connection, limit: i64) -> Result<Vec<UserAccount>> {
        Self::query_ranked(
            conn,
            &format!(
                "SELECT {ACCOUNT_COLUMNS} FROM scores
                 ORDER BY score DESC, account_level DESC LIMIT ?1"
            ),
            limit,
        )
    }

    /// Bottom `limit` accounts by score.
    pub fn bottom_scores(conn: &Connection, limit: i64) -> Result<Vec<UserAccount>> {
        Self::query_ranked(
            conn,
            &format!(
                "SELECT {ACCOUNT_COLUMNS} FROM scores
                 ORDER BY score ASC, account_level DESC LIMIT ?1"
            ),
            limit,
        )
    }

    /// Top `limit` token holders (level 2 and above only).
    pub fn top_tokens(conn: &Connection, limit: i64) -> Result<Vec<UserAccount>> {
        Self::query_ranked(
            conn,
            &format!(
                "SELECT {ACCOUNT_COLUMNS} FROM scores
                 WHERE account_level >= 2
                 ORDER BY token DESC, score DESC LIMIT ?1"
            ),
            limit,
        )
    }

    /// Bottom `limit` token holders (level 2 and above only).
    pub fn bottom_tokens(conn: &Connection, limit: i64) -> Result<Vec<UserAccount>> {
        Self::query_ranked(
            conn,
            &format!(
                "SELECT {ACCOUNT_COLUMNS} FROM scores
                 WHERE account_level >= 2
                 ORDER BY token ASC, score ASC LIMIT ?1"
            ),
            limit,
        )
    }

    fn query_ranked(conn: &Connection, sql: &str, limit: i64) -> Result<Vec<UserAccount>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params![limit], Self::map_row)?;
        let mut accounts = Vec::new();
        for row in rows {
            accounts.push(row?);
        }
        Ok(accounts)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
