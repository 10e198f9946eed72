//! # kudos-core
//!
//! Foundation crate for the kudos score ledger and token economy.
//!
//! Provides the shared vocabulary the other kudos crates depend on:
//!
//! - **Accounts**: [`account::UserAccount`] and [`account::BotWallet`]
//! - **Transfers**: [`transfer::TransferLogEntry`] and [`transfer::SenderIdentity`]
//! - **Text helpers**: name cleaning, obscured receiver keys, DM detection
//! - **Settings**: [`settings::KudosSettings`] with file and env layering
//! - **Notifier**: [`notify::Notifier`] capability trait for user-visible nudges
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `kudos-store` and `kudos-engine`.

#![deny(unsafe_code)]

pub mod account;
pub mod notify;
pub mod settings;
pub mod text;
pub mod transfer;
