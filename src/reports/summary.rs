//! Month total and remaining balance

use chrono::NaiveDate;

use crate::models::{Expense, Money, Month};

/// Whether spending is still within the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    /// Remaining balance is zero or positive
    UnderBudget,
    OverBudget,
}

impl BalanceStatus {
    pub fn from_remaining(remaining: Money) -> Self {
        if remaining.is_negative() {
            Self::OverBudget
        } else {
            Self::UnderBudget
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Self::OverBudget)
    }
}

/// Expenses dated in `month`; records with unparseable dates never match
pub fn in_month<'a>(expenses: &'a [Expense], month: Month) -> impl Iterator<Item = &'a Expense> + 'a {
    expenses
        .iter()
        .filter(move |e| e.parsed_date().is_some_and(|d| month.contains(d)))
}

/// Sum of amounts dated in the same calendar month as `reference_date`
pub fn month_total(expenses: &[Expense], reference_date: NaiveDate) -> Money {
    in_month(expenses, Month::from_date(reference_date))
        .map(|e| e.amount)
        .sum()
}

/// Budget minus spending; negative when over budget
pub fn remaining_balance(budget: Money, month_total: Money) -> Money {
    budget - month_total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseId, NewExpense};

    fn expense(id: u64, cents: i64, category: Category, date: &str) -> Expense {
        NewExpense::new("Item", Money::from_cents(cents), category, date)
            .into_expense(ExpenseId::from_raw(id))
    }

    fn march_20() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(month_total(&[], march_20()), Money::zero());
    }

    #[test]
    fn test_month_total_filters_month() {
        let expenses = vec![
            expense(1, 2000, Category::Food, "2024-03-01"),
            expense(2, 1500, Category::Food, "2024-03-15"),
            expense(3, 3000, Category::Transport, "2024-02-20"),
        ];
        assert_eq!(month_total(&expenses, march_20()), Money::from_cents(3500));
    }

    #[test]
    fn test_same_month_other_year_excluded() {
        let expenses = vec![
            expense(1, 2000, Category::Food, "2023-03-10"),
            expense(2, 500, Category::Food, "2024-03-10"),
        ];
        assert_eq!(month_total(&expenses, march_20()), Money::from_cents(500));
    }

    #[test]
    fn test_malformed_dates_are_skipped() {
        let expenses = vec![
            expense(1, 700, Category::Food, "15/03/2024"),
            expense(2, 1000, Category::Food, "2024-03-16"),
            expense(3, 900, Category::Food, ""),
        ];
        assert_eq!(month_total(&expenses, march_20()), Money::from_cents(1000));
    }

    #[test]
    fn test_remaining_balance() {
        let budget = Money::from_cents(50000);
        assert_eq!(
            remaining_balance(budget, Money::from_cents(12000)),
            Money::from_cents(38000)
        );

        let over = remaining_balance(budget, Money::from_cents(60000));
        assert_eq!(over, Money::from_cents(-10000));
        assert_eq!(BalanceStatus::from_remaining(over), BalanceStatus::OverBudget);
        assert!(BalanceStatus::from_remaining(over).is_over());
    }

    #[test]
    fn test_exactly_on_budget_is_under() {
        let remaining = remaining_balance(Money::from_cents(100), Money::from_cents(100));
        assert_eq!(BalanceStatus::from_remaining(remaining), BalanceStatus::UnderBudget);
    }
}
