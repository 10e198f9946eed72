//! # kudos-engine
//!
//! The scoring and token-transfer core:
//!
//! - **[`ScoreKeeper`]**: validates a proposed score change (self-send,
//!   bot-in-DM, and rate-limit guards), applies it to the receiver's
//!   document, and triggers tier transitions
//! - **[`TokenEconomy`]**: level-up minting and the wallet transfer
//!   primitive, including the tip double-debit
//! - **[`RateLimiter`]**: sliding-window recency check over the transfer log
//! - **[`AttributionTracker`]**: per-sender points-given tally with the
//!   peer-feedback nudge
//!
//! Requests are handled independently and may run concurrently; the only
//! serialization is what the store's row-level atomic primitives provide.

#![deny(unsafe_code)]

pub mod attribution;
pub mod economy;
pub mod errors;
pub mod rate_limit;
pub mod scorekeeper;

pub use attribution::{AttributionTracker, FeedbackSuggestion};
pub use economy::TokenEconomy;
pub use errors::{EngineError, Result};
pub use rate_limit::RateLimiter;
pub use scorekeeper::ScoreKeeper;
