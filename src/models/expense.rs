//! Expense model
//!
//! An expense is a dated, categorized, non-negative amount. The date is kept
//! as text in the canonical encoding so that records written by older
//! versions with malformed dates can still be loaded and displayed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::date::{format_canonical, parse_canonical_date};
use super::ids::ExpenseId;
use super::money::Money;

/// Name given to expenses entered without one
pub const DEFAULT_EXPENSE_NAME: &str = "Expense";

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned identifier
    pub id: ExpenseId,

    /// Free-text description
    pub name: String,

    /// Amount spent (never negative)
    pub amount: Money,

    pub category: Category,

    /// Date in `YYYY-MM-DD`
    pub date: String,
}

impl Expense {
    /// Parsed date, `None` if the stored text is not canonical
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_canonical_date(&self.date)
    }

    /// Validate the record
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(&self.name, self.amount, &self.date)
    }

    /// Short line for lists: "Food • 2024-03-15"
    pub fn subtitle(&self) -> String {
        format!("{} • {}", self.category, self.date)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.name, self.amount)
    }
}

/// Input for recording a new expense; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub name: String,
    pub amount: Money,
    pub category: Category,
    pub date: String,
}

impl NewExpense {
    /// Create an input, trimming the name
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        category: Category,
        date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            amount,
            category,
            date: date.into().trim().to_string(),
        }
    }

    /// Create an input from a typed date
    pub fn on(name: impl Into<String>, amount: Money, category: Category, date: NaiveDate) -> Self {
        Self::new(name, amount, category, format_canonical(date))
    }

    /// Replace a blank name with `default_name`
    pub fn with_default_name(mut self, default_name: &str) -> Self {
        if self.name.trim().is_empty() {
            self.name = default_name.to_string();
        }
        self
    }

    /// Validate the input
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(&self.name, self.amount, &self.date)
    }

    /// Attach a store-assigned id
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            name: self.name,
            amount: self.amount,
            category: self.category,
            date: self.date,
        }
    }
}

fn validate_fields(name: &str, amount: Money, date: &str) -> Result<(), ExpenseValidationError> {
    if name.trim().is_empty() {
        return Err(ExpenseValidationError::EmptyName);
    }

    if amount.is_negative() {
        return Err(ExpenseValidationError::NegativeAmount(amount));
    }

    if parse_canonical_date(date).is_none() {
        return Err(ExpenseValidationError::NonCanonicalDate(date.to_string()));
    }

    Ok(())
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    NegativeAmount(Money),
    NonCanonicalDate(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "Expense amount cannot be negative ({})", amount)
            }
            Self::NonCanonicalDate(date) => {
                write!(f, "Expense date must be YYYY-MM-DD, got '{}'", date)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
