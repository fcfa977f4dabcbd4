//! Audit logging for pocket-ledger
//!
//! Every committed mutation of an expense or of the monthly budget is
//! appended to a line-delimited JSON log with its before/after values.
//!
//! - `AuditEntry`: one operation on one entity
//! - `AuditLogger`: appends entries to the JSONL file and reads them back
//! - `generate_diff`: human-readable summary of top-level field changes
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_ledger::audit::{AuditEntry, AuditLogger, EntityType, generate_diff};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::Expense,
//!     expense.id.to_string(),
//!     Some(expense.name.clone()),
//!     &expense,
//! );
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
