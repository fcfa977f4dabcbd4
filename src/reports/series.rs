//! Trailing monthly spending series for the bar chart

use chrono::NaiveDate;

use crate::models::{Expense, Money, Month, Rgb};

use super::summary::in_month;

/// Months of history before the reference month
pub const DEFAULT_MONTHS_BACK: u32 = 5;

/// Bar colors, cycled by bucket position
pub const BAR_PALETTE: [Rgb; 5] = [
    Rgb::from_hex(0x2196F3),
    Rgb::from_hex(0x4CAF50),
    Rgb::from_hex(0xFF9800),
    Rgb::from_hex(0xE91E63),
    Rgb::from_hex(0x9C27B0),
];

/// Spending for one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    pub month: Month,
    pub total: Money,
    /// Three-letter month abbreviation ("Jan".."Dec")
    pub label: &'static str,
    pub color: Rgb,
}

impl MonthBucket {
    /// Bar caption, e.g. "Mar : $35.00"
    pub fn description(&self) -> String {
        format!("{} : {}", self.label, self.total)
    }
}

/// Exactly `months_back + 1` buckets, oldest first, ending with the month of
/// `reference_date`. Months without expenses have a zero total.
pub fn monthly_series(
    expenses: &[Expense],
    reference_date: NaiveDate,
    months_back: u32,
) -> Vec<MonthBucket> {
    let reference = Month::from_date(reference_date);

    (0..=months_back)
        .rev()
        .enumerate()
        .map(|(index, k)| {
            let month = reference.shifted_back(k);
            MonthBucket {
                month,
                total: in_month(expenses, month).map(|e| e.amount).sum(),
                label: month.short_label(),
                color: BAR_PALETTE[index % BAR_PALETTE.len()],
            }
        })
        .collect()
}

/// True when every bucket is zero (nothing to chart)
pub fn series_is_empty(series: &[MonthBucket]) -> bool {
    series.iter().all(|b| b.total.is_zero())
}

/// Largest bucket total in currency units, 0 for an empty series
pub fn series_max(series: &[MonthBucket]) -> f64 {
    series
        .iter()
        .map(|b| b.total.to_f64())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseId, NewExpense};

    fn expense(id: u64, cents: i64, date: &str) -> Expense {
        NewExpense::new("Item", Money::from_cents(cents), Category::Food, date)
            .into_expense(ExpenseId::from_raw(id))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_list_gives_zero_series() {
        let series = monthly_series(&[], date(2024, 3, 20), DEFAULT_MONTHS_BACK);
        assert_eq!(series.len(), 6);
        assert!(series_is_empty(&series));
        assert_eq!(series_max(&series), 0.0);
    }

    #[test]
    fn test_series_shape_across_year_boundary() {
        let series = monthly_series(&[], date(2024, 3, 20), DEFAULT_MONTHS_BACK);

        let months: Vec<String> = series.iter().map(|b| b.month.to_string()).collect();
        assert_eq!(
            months,
            vec!["2023-10", "2023-11", "2023-12", "2024-01", "2024-02", "2024-03"]
        );
        let labels: Vec<_> = series.iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["Oct", "Nov", "Dec", "Jan", "Feb", "Mar"]);

        for pair in series.windows(2) {
            assert!(pair[0].month < pair[1].month);
        }
        assert_eq!(series.last().unwrap().month, Month::from_date(date(2024, 3, 20)));
    }

    #[test]
    fn test_months_back_zero() {
        let series = monthly_series(&[expense(1, 100, "2024-03-01")], date(2024, 3, 20), 0);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].total, Money::from_cents(100));
    }

    #[test]
    fn test_bucket_totals() {
        let expenses = vec![
            expense(1, 2000, "2024-03-01"),
            expense(2, 1500, "2024-03-15"),
            expense(3, 3000, "2024-02-20"),
            expense(4, 999, "2023-09-30"),
            expense(5, 450, "20/02/2024"),
        ];

        let series = monthly_series(&expenses, date(2024, 3, 20), DEFAULT_MONTHS_BACK);
        assert_eq!(series[5].total, Money::from_cents(3500));
        assert_eq!(series[4].total, Money::from_cents(3000));
        assert!(series[..4].iter().all(|b| b.total.is_zero()));
        assert!(!series_is_empty(&series));
        assert_eq!(series_max(&series), 35.0);
        assert_eq!(series[5].description(), "Mar : $35.00");
    }

    #[test]
    fn test_bar_colors_cycle() {
        let series = monthly_series(&[], date(2024, 3, 20), 6);
        assert_eq!(series[0].color, BAR_PALETTE[0]);
        assert_eq!(series[5].color, BAR_PALETTE[0]);
        assert_eq!(series[6].color, BAR_PALETTE[1]);
    }
}
