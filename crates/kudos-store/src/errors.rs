//! Error types for the ledger store.
//!
//! [`StoreError`] is the primary error type returned by all store
//! operations, with specific variants for the common failure modes while
//! keeping the surface small enough for exhaustive matching.

use thiserror::Error;

/// Errors that can occur during ledger store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `SQLite` database error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// JSON serialization error for row-embedded maps.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Schema migration failed.
    #[error("migration error: {message}")]
    Migration {
        /// Describes which migration failed and why.
        message: String,
    },

    /// Requested account row does not exist.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// The wallet row is missing (should be seeded at migration time).
    #[error("wallet not found: {0}")]
    WalletNotFound(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
