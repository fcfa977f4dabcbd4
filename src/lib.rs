//! pocket-ledger - personal expense ledger core
//!
//! This library records dated, categorized expenses and a single monthly
//! budget, persists them as JSON, and computes the views a budgeting app
//! shows: the month's total and remaining balance, spending by category, a
//! trailing monthly series and chart axis scales.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, money, categories, months)
//! - `storage`: Observable JSON file stores for expenses and the budget
//! - `reports`: Aggregation and axis scaling, pure functions over snapshots
//! - `services`: The `Ledger` composition root and the background writer
//! - `audit`: Audit logging system
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_ledger::config::LedgerPaths;
//! use pocket_ledger::models::{Category, Money, NewExpense};
//! use pocket_ledger::services::Ledger;
//!
//! let ledger = Ledger::open(LedgerPaths::new()?)?;
//! ledger.add_expense(NewExpense::new(
//!     "Lunch",
//!     Money::from_cents(1250),
//!     Category::Food,
//!     "2024-03-15",
//! ))?;
//! let dashboard = ledger.dashboard_today()?;
//! println!("Spent this month: {}", dashboard.total_text());
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
