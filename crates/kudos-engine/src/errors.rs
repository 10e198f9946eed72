//! Error types for the scoring engine.

use thiserror::Error;

/// Errors that can occur during engine operations.
///
/// Guard rejections (self-send, bot-in-DM, rate-limited) are not errors;
/// they surface as `None` results from the orchestrator.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Underlying ledger store failure.
    #[error("{0}")]
    Store(#[from] kudos_store::StoreError),
}

/// Convenience type alias for engine results.
pub type Result<T> = std::result::Result<T, EngineError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
