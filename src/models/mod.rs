//! Core data models for pocket-ledger
//!
//! Expenses, money amounts, categories, calendar months and the canonical
//! date encoding shared by storage and reports.

pub mod category;
pub mod color;
pub mod date;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;

pub use category::Category;
pub use color::{palette_color, Rgb, PALETTE};
pub use date::{parse_canonical_date, CANONICAL_DATE_FORMAT, DISPLAY_DATE_FORMAT};
pub use expense::{Expense, ExpenseValidationError, NewExpense, DEFAULT_EXPENSE_NAME};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use period::{Month, PeriodParseError};
