//! Stateless row repositories.
//!
//! Each repository is a unit struct whose methods take `&Connection`,
//! so the caller controls pooling and (where needed) transactions.

pub mod score_log;
pub mod scores;
pub mod wallet;

pub use score_log::ScoreLogRepo;
pub use scores::ScoreRepo;
pub use wallet::WalletRepo;
