//! Wallet repository — the shared token pool singleton.

use kudos_core::account::BotWallet;
use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::Result;

/// Wallet repository — stateless, every method takes `&Connection`.
pub struct WalletRepo;

impl WalletRepo {
    /// Find the wallet row for a bot identity name.
    pub fn find(conn: &Connection, name: &str) -> Result<Option<BotWallet>> {
        let wallet = conn
            .query_row(
                "SELECT name, token, magic_string FROM bot_token WHERE name = ?1",
                params![name],
                |row| {
                    Ok(BotWallet {
                        name: row.get(0)?,
                        token: row.get(1)?,
                        magic_string: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(wallet)
    }

    /// Atomically add `delta` to the wallet pool. Returns whether the
    /// wallet row existed.
    pub fn increment(conn: &Connection, name: &str, delta: i64) -> Result<bool> {
        let updated = conn.execute(
            "UPDATE bot_token SET token = token + ?2 WHERE name = ?1",
            params![name, delta],
        )?;
        Ok(updated > 0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, "kudos").unwrap();
        conn
    }

    #[test]
    fn seeded_wallet_is_found() {
        let conn = conn();
        let wallet = WalletRepo::find(&conn, "kudos").unwrap().unwrap();
        assert_eq!(wallet.token, 0);
        assert_eq!(wallet.magic_string, None);
    }

    #[test]
    fn missing_wallet_is_none() {
        let conn = conn();
        assert!(WalletRepo::find(&conn, "other-bot").unwrap().is_none());
    }

    #[test]
    fn increment_moves_pool_both_directions() {
        let conn = conn();
        assert!(WalletRepo::increment(&conn, "kudos", 100).unwrap());
        assert!(WalletRepo::increment(&conn, "kudos", -30).unwrap());
        let wallet = WalletRepo::find(&conn, "kudos").unwrap().unwrap();
        assert_eq!(wallet.token, 70);
    }

    #[test]
    fn increment_missing_wallet_reports_false() {
        let conn = conn();
        assert!(!WalletRepo::increment(&conn, "other-bot", 5).unwrap());
    }
}
