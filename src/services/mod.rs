//! Service layer for pocket-ledger
//!
//! The service layer sits on top of storage: input defaulting, audit
//! logging around mutations, and the background writer that keeps disk I/O
//! off the caller's thread.

pub mod ledger;
pub mod writer;

pub use ledger::Ledger;
pub use writer::{PendingWrite, WriteCommand, WriteOutcome, WriteQueue};
