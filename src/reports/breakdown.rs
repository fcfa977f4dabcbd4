//! Spending by category for one month
//!
//! Slices come out in order of first appearance among the month's expenses,
//! most recent first. Colors are positional by default: the slice at index
//! `i` gets `PALETTE[i % 5]`, so a category's color depends on which other
//! categories are present. `ColorAssignment::Stable` opts into a fixed
//! category-to-color table instead.

use chrono::NaiveDate;

use crate::models::{palette_color, Category, Expense, Money, Month, Rgb};

use super::summary::in_month;

/// How slice colors are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorAssignment {
    /// By position in the emitted order
    #[default]
    Positional,
    /// Fixed color per category; custom categories cycle through the
    /// palette in order of first appearance
    Stable,
}

/// One category's share of a month's spending
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub category: Category,
    pub total: Money,
    pub color: Rgb,
    /// Share of the month total in percent (0 when the total is 0)
    pub percentage: f64,
    /// Slice caption, e.g. "Food : $35.00"
    pub description: String,
}

/// Breakdown with positional colors
pub fn category_breakdown(expenses: &[Expense], reference_date: NaiveDate) -> Vec<CategorySlice> {
    category_breakdown_with(expenses, reference_date, ColorAssignment::Positional)
}

/// Breakdown with an explicit color assignment
pub fn category_breakdown_with(
    expenses: &[Expense],
    reference_date: NaiveDate,
    colors: ColorAssignment,
) -> Vec<CategorySlice> {
    let mut month: Vec<&Expense> = in_month(expenses, Month::from_date(reference_date)).collect();
    // Stable: same-date records keep their input order
    month.sort_by(|a, b| b.date.cmp(&a.date));

    let mut groups: Vec<(Category, Money)> = Vec::new();
    for expense in month {
        match groups.iter_mut().find(|(c, _)| *c == expense.category) {
            Some((_, total)) => *total += expense.amount,
            None => groups.push((expense.category.clone(), expense.amount)),
        }
    }

    let month_total: Money = groups.iter().map(|(_, total)| *total).sum();
    let mut custom_seen = 0;

    groups
        .into_iter()
        .enumerate()
        .map(|(index, (category, total))| {
            let color = match colors {
                ColorAssignment::Positional => palette_color(index),
                ColorAssignment::Stable => category.stable_color().unwrap_or_else(|| {
                    custom_seen += 1;
                    palette_color(custom_seen - 1)
                }),
            };

            let percentage = if month_total.is_zero() {
                0.0
            } else {
                total.to_f64() / month_total.to_f64() * 100.0
            };

            CategorySlice {
                description: format!("{} : {}", category, total),
                category,
                total,
                color,
                percentage,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, NewExpense, PALETTE};
    use crate::reports::summary::month_total;

    fn expense(id: u64, cents: i64, category: Category, date: &str) -> Expense {
        NewExpense::new("Item", Money::from_cents(cents), category, date)
            .into_expense(ExpenseId::from_raw(id))
    }

    fn march_20() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    #[test]
    fn test_empty_month() {
        assert!(category_breakdown(&[], march_20()).is_empty());

        let february_only = vec![expense(1, 3000, Category::Transport, "2024-02-20")];
        assert!(category_breakdown(&february_only, march_20()).is_empty());
    }

    #[test]
    fn test_other_month_excluded() {
        let expenses = vec![
            expense(1, 2000, Category::Food, "2024-03-01"),
            expense(2, 1500, Category::Food, "2024-03-15"),
            expense(3, 3000, Category::Transport, "2024-02-20"),
        ];

        let slices = category_breakdown(&expenses, march_20());
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].category, Category::Food);
        assert_eq!(slices[0].total, Money::from_cents(3500));
        assert_eq!(slices[0].color, PALETTE[0]);
        assert_eq!(slices[0].description, "Food : $35.00");
        assert_eq!(slices[0].percentage, 100.0);
    }

    #[test]
    fn test_order_of_first_appearance_most_recent_first() {
        let expenses = vec![
            expense(1, 1000, Category::Housing, "2024-03-02"),
            expense(2, 500, Category::Leisure, "2024-03-18"),
            expense(3, 700, Category::Food, "2024-03-10"),
            expense(4, 300, Category::Leisure, "2024-03-03"),
        ];

        let slices = category_breakdown(&expenses, march_20());
        let order: Vec<_> = slices.iter().map(|s| s.category.clone()).collect();
        assert_eq!(order, vec![Category::Leisure, Category::Food, Category::Housing]);
        assert_eq!(slices[0].total, Money::from_cents(800));

        let colors: Vec<_> = slices.iter().map(|s| s.color).collect();
        assert_eq!(colors, vec![PALETTE[0], PALETTE[1], PALETTE[2]]);
    }

    #[test]
    fn test_same_date_keeps_input_order() {
        let expenses = vec![
            expense(1, 100, Category::Transport, "2024-03-05"),
            expense(2, 100, Category::Food, "2024-03-05"),
        ];

        let slices = category_breakdown(&expenses, march_20());
        assert_eq!(slices[0].category, Category::Transport);
        assert_eq!(slices[1].category, Category::Food);
    }

    #[test]
    fn test_palette_wraps_after_five() {
        let expenses: Vec<_> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let date = format!("2024-03-{:02}", 10 - i);
                expense(i as u64 + 1, 100, Category::Custom(name.to_string()), &date)
            })
            .collect();

        let slices = category_breakdown(&expenses, march_20());
        assert_eq!(slices.len(), 6);
        assert_eq!(slices[5].color, PALETTE[0]);
    }

    #[test]
    fn test_sum_equals_month_total() {
        let expenses = vec![
            expense(1, 1234, Category::Food, "2024-03-01"),
            expense(2, 999, Category::Transport, "2024-03-11"),
            expense(3, 4321, Category::Food, "2024-03-19"),
            expense(4, 50, Category::Custom("Pets".into()), "2024-03-07"),
            expense(5, 7000, Category::Housing, "2024-04-01"),
            expense(6, 800, Category::Food, "bad date"),
        ];

        let slices = category_breakdown(&expenses, march_20());
        let sum: Money = slices.iter().map(|s| s.total).sum();
        assert_eq!(sum, month_total(&expenses, march_20()));

        let percent: f64 = slices.iter().map(|s| s.percentage).sum();
        assert!((percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_stable_colors() {
        let expenses = vec![
            expense(1, 100, Category::Other, "2024-03-12"),
            expense(2, 100, Category::Custom("Gifts".into()), "2024-03-11"),
            expense(3, 100, Category::Transport, "2024-03-10"),
            expense(4, 100, Category::Custom("Pets".into()), "2024-03-09"),
        ];

        let slices = category_breakdown_with(&expenses, march_20(), ColorAssignment::Stable);
        assert_eq!(slices[0].color, Category::Other.stable_color().unwrap());
        assert_eq!(slices[1].color, PALETTE[0]);
        assert_eq!(slices[2].color, Category::Transport.stable_color().unwrap());
        assert_eq!(slices[3].color, PALETTE[1]);
    }

    #[test]
    fn test_stable_color_independent_of_other_categories() {
        let alone = vec![expense(1, 100, Category::Transport, "2024-03-10")];
        let with_food = vec![
            expense(1, 100, Category::Food, "2024-03-12"),
            expense(2, 100, Category::Transport, "2024-03-10"),
        ];

        let a = category_breakdown_with(&alone, march_20(), ColorAssignment::Stable);
        let b = category_breakdown_with(&with_food, march_20(), ColorAssignment::Stable);
        assert_eq!(a[0].color, b[1].color);

        // Positional colors move with the set of categories present
        let a = category_breakdown(&alone, march_20());
        let b = category_breakdown(&with_food, march_20());
        assert_ne!(a[0].color, b[1].color);
    }
}
