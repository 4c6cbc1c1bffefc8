//! QP Bank Common Types
//!
//! This crate contains the vocabulary shared by the ledger and the teller
//! shell, including account identifiers, monetary helpers, timestamps and
//! the error taxonomy.

pub mod identifiers;
pub mod monetary;
pub mod error;
pub mod time;

pub use identifiers::*;
pub use monetary::*;
pub use error::*;
pub use time::*;
