//! QP Bank Ledger
//!
//! A single holder's checking and savings balances with an append-only
//! transaction journal, plus the session holder that keeps at most one
//! ledger alive per process.

pub mod engine;
pub mod account;
pub mod journal;
pub mod balance;
pub mod session;

pub use engine::{Ledger, Receipt, TransferReceipt};
pub use account::{AccountHolder, Pin};
pub use journal::{Journal, TransactionKind, TransactionRecord};
pub use balance::Balances;
pub use session::{AccountSummary, Session};
