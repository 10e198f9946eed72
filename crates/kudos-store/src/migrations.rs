//! Version-tracked schema migrations.
//!
//! Each migration runs at most once; applied versions are recorded in
//! `schema_migrations`. Running against an already-migrated database is
//! a no-op, so callers can run migrations unconditionally at startup.
//!
//! The wallet row is seeded here (with an empty pool) because the engine
//! never creates it: the wallet is pre-provisioned and only ever moved
//! from.

use rusqlite::Connection;
use tracing::debug;

use crate::errors::{Result, StoreError};

/// Ordered list of (version, sql) migrations.
const MIGRATIONS: &[(&str, &str)] = &[(
    "v001_initial_schema",
    "CREATE TABLE IF NOT EXISTS scores (
         name          TEXT PRIMARY KEY,
         score         INTEGER NOT NULL DEFAULT 0,
         token         INTEGER,
         account_level INTEGER NOT NULL DEFAULT 1,
         joined_at     TEXT NOT NULL,
         reasons       TEXT NOT NULL DEFAULT '{}',
         points_given  TEXT NOT NULL DEFAULT '{}'
     );
     CREATE TABLE IF NOT EXISTS score_log (
         id           INTEGER PRIMARY KEY AUTOINCREMENT,
         from_name    TEXT NOT NULL,
         to_name      TEXT NOT NULL,
         room         TEXT NOT NULL,
         reason       TEXT,
         score_change INTEGER NOT NULL,
         created_at   TEXT NOT NULL
     );
     CREATE INDEX IF NOT EXISTS idx_score_log_pair_time
         ON score_log (from_name, to_name, created_at);
     CREATE TABLE IF NOT EXISTS bot_token (
         name         TEXT PRIMARY KEY,
         token        INTEGER NOT NULL DEFAULT 0,
         magic_string TEXT
     );",
)];

/// Run all pending migrations, then ensure the wallet row for `bot_name`
/// exists.
pub fn run_migrations(conn: &Connection, bot_name: &str) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
             version    TEXT PRIMARY KEY,
             applied_at TEXT NOT NULL
         );",
    )?;

    for (version, sql) in MIGRATIONS {
        let applied: i64 = conn.query_row(
            "SELECT COUNT(*) FROM schema_migrations WHERE version = ?1",
            [version],
            |row| row.get(0),
        )?;
        if applied > 0 {
            continue;
        }
        debug!(version, "applying migration");
        conn.execute_batch(sql).map_err(|e| StoreError::Migration {
            message: format!("{version} failed: {e}"),
        })?;
        let _ = conn.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
            rusqlite::params![version, chrono::Utc::now().to_rfc3339()],
        )?;
    }

    // Seed the wallet singleton with an empty pool if absent.
    let _ = conn.execute(
        "INSERT OR IGNORE INTO bot_token (name, token) VALUES (?1, 0)",
        [bot_name],
    )?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
