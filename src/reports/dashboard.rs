//! Dashboard view
//!
//! Everything the home and summary screens show for one reference date,
//! recomputed from an expense snapshot and the budget.

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::date::to_display_date;
use crate::models::{Expense, Money, Month};

use super::axis::{AxisScale, DEFAULT_LABEL_DIVISIONS};
use super::breakdown::{category_breakdown_with, CategorySlice, ColorAssignment};
use super::series::{monthly_series, series_is_empty, series_max, MonthBucket};
use super::summary::{month_total, remaining_balance, BalanceStatus};

/// A recent expense with its date in the user's display format
#[derive(Debug, Clone, PartialEq)]
pub struct RecentExpense {
    pub expense: Expense,
    pub display_date: String,
    pub display_amount: String,
}

/// Derived view for one reference date
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub month: Month,
    pub month_total: Money,
    pub budget: Money,
    pub remaining: Money,
    pub status: BalanceStatus,
    pub breakdown: Vec<CategorySlice>,
    pub series: Vec<MonthBucket>,
    /// True when the series has no spending at all
    pub series_empty: bool,
    pub axis: AxisScale,
    pub axis_labels: Vec<String>,
    pub recent: Vec<RecentExpense>,
    currency_symbol: String,
}

impl Dashboard {
    /// Build the view. `expenses` need not be sorted.
    pub fn build(
        expenses: &[Expense],
        budget: Money,
        reference_date: NaiveDate,
        settings: &Settings,
    ) -> Self {
        let total = month_total(expenses, reference_date);
        let remaining = remaining_balance(budget, total);

        let colors = if settings.stable_category_colors {
            ColorAssignment::Stable
        } else {
            ColorAssignment::Positional
        };

        let series = monthly_series(expenses, reference_date, settings.months_back);
        let axis = AxisScale::for_max(series_max(&series));

        let mut ordered: Vec<&Expense> = expenses.iter().collect();
        ordered.sort_by(|a, b| b.date.cmp(&a.date));
        let recent = ordered
            .into_iter()
            .take(settings.recent_limit)
            .map(|e| RecentExpense {
                display_date: to_display_date(&e.date, &settings.display_date_format),
                display_amount: e.amount.format_with_symbol(&settings.currency_symbol),
                expense: e.clone(),
            })
            .collect();

        Self {
            month: Month::from_date(reference_date),
            month_total: total,
            budget,
            remaining,
            status: BalanceStatus::from_remaining(remaining),
            breakdown: category_breakdown_with(expenses, reference_date, colors),
            series_empty: series_is_empty(&series),
            axis_labels: axis.labels(DEFAULT_LABEL_DIVISIONS),
            axis,
            series,
            recent,
            currency_symbol: settings.currency_symbol.clone(),
        }
    }

    /// Format an amount with the configured currency symbol
    pub fn format(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// "Total spent: $35.00"-style headline amount
    pub fn total_text(&self) -> String {
        self.format(self.month_total)
    }

    pub fn remaining_text(&self) -> String {
        self.format(self.remaining)
    }

    /// True when the breakdown chart should show its "no data" placeholder
    pub fn breakdown_empty(&self) -> bool {
        self.breakdown.is_empty()
    }
}
