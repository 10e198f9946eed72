//! # kudos-store
//!
//! `SQLite` ledger store for the kudos score engine.
//!
//! Responsible for:
//!
//! - **Connection pool**: `r2d2` over `rusqlite` with WAL and pragmas
//! - **Migrations**: version-tracked schema bootstrap, wallet seeding
//! - **Repositories**: stateless row access (`ScoreRepo`, `ScoreLogRepo`,
//!   `WalletRepo`), every method takes `&Connection`
//! - **`LedgerStore`**: the high-level facade exposing document-store-shaped
//!   primitives — find-one, whole-row upsert-replace, atomic increments,
//!   append-only log inserts, and windowed recency counts
//!
//! Row upserts replace the whole document and are last-writer-wins by
//! design; callers that computed their row from a stale read can lose
//! updates, and the engine accepts that.

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod migrations;
pub mod repositories;
pub mod store;

pub use connection::{ConnectionConfig, ConnectionPool, new_file, new_in_memory};
pub use errors::{Result, StoreError};
pub use store::LedgerStore;
