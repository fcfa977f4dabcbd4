//! Reports module for pocket-ledger
//!
//! Pure computations over an expense snapshot: month total and remaining
//! balance, category breakdown, trailing monthly series, chart axis scaling,
//! and the dashboard view composing them. Nothing here performs I/O.

pub mod axis;
pub mod breakdown;
pub mod dashboard;
pub mod series;
pub mod summary;

pub use crate::models::date::parse_canonical_date;
pub use axis::{compute_nice_step, round_to_nice, AxisScale, DEFAULT_LABEL_DIVISIONS};
pub use breakdown::{category_breakdown, category_breakdown_with, CategorySlice, ColorAssignment};
pub use dashboard::{Dashboard, RecentExpense};
pub use series::{monthly_series, series_is_empty, MonthBucket, DEFAULT_MONTHS_BACK};
pub use summary::{month_total, remaining_balance, BalanceStatus};
