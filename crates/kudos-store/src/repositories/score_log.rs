//! Transfer log repository — append-only, read back only for recency.

use kudos_core::transfer::TransferLogEntry;
use rusqlite::{Connection, params};

use crate::errors::Result;

/// Transfer log repository — stateless, every method takes `&Connection`.
pub struct ScoreLogRepo;

impl ScoreLogRepo {
    /// Append one transfer entry. Entries are never updated or deleted.
    pub fn insert(conn: &Connection, entry: &TransferLogEntry) -> Result<()> {
        let _ = conn.execute(
            "INSERT INTO score_log (from_name, to_name, room, reason, score_change, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.from,
                entry.to,
                entry.room,
                entry.reason,
                entry.score_change,
                entry.created_at,
            ],
        )?;
        Ok(())
    }

    /// Count entries for the exact ordered `(from, to)` pair at or after
    /// `cutoff` (RFC 3339). All timestamps are UTC with a fixed offset,
    /// so string comparison is order-preserving.
    pub fn count_pair_since(
        conn: &Connection,
        from: &str,
        to: &str,
        cutoff: &str,
    ) -> Result<u64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM score_log
             WHERE from_name = ?1 AND to_name = ?2 AND created_at >= ?3",
            params![from, to, cutoff],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or(0))
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
    fn insert_and_count_exact_pair() {
        let conn = conn();
        let entry = TransferLogEntry::new("bob", "alice", "general", Some("help"), 1);
        ScoreLogRepo::insert(&conn, &entry).unwrap();

        let count = ScoreLogRepo::count_pair_since(&conn, "bob", "alice", "2000-01-01T00:00:00+00:00")
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn count_is_direction_sensitive() {
        let conn = conn();
        let entry = TransferLogEntry::new("bob", "alice", "general", None, 1);
        ScoreLogRepo::insert(&conn, &entry).unwrap();

        let reverse = ScoreLogRepo::count_pair_since(&conn, "alice", "bob", "2000-01-01T00:00:00+00:00")
            .unwrap();
        assert_eq!(reverse, 0);
    }

    #[test]
    fn count_respects_cutoff() {
        let conn = conn();
        let mut entry = TransferLogEntry::new("bob", "alice", "general", None, 1);
        entry.created_at = "2020-01-01T00:00:00+00:00".to_owned();
        ScoreLogRepo::insert(&conn, &entry).unwrap();

        let stale = ScoreLogRepo::count_pair_since(&conn, "bob", "alice", "2021-01-01T00:00:00+00:00")
            .unwrap();
        assert_eq!(stale, 0);
        let fresh = ScoreLogRepo::count_pair_since(&conn, "bob", "alice", "2019-01-01T00:00:00+00:00")
            .unwrap();
        assert_eq!(fresh, 1);
    }
}
