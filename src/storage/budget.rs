//! Monthly budget repository for JSON storage
//!
//! A single global budget scalar kept as one key of budget.json.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

use super::file_io::{read_json, write_json_atomic};
use super::observable::{Subscribers, Subscription};

/// Serializable budget document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BudgetData {
    #[serde(default)]
    monthly_budget: Money,
}

/// Persisted, observable monthly budget
pub struct BudgetStore {
    path: PathBuf,
    amount: RwLock<Money>,
    write_gate: Mutex<()>,
    subscribers: Subscribers<Money>,
}

impl BudgetStore {
    /// Create a store backed by `path` with a zero budget
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            amount: RwLock::new(Money::zero()),
            write_gate: Mutex::new(()),
            subscribers: Subscribers::new(),
        }
    }

    /// Create a store and load its file
    pub fn open(path: PathBuf) -> LedgerResult<Self> {
        let store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    /// Load the budget from disk (0 when the file or key is absent)
    pub fn load(&self) -> LedgerResult<()> {
        let data: BudgetData = read_json(&self.path)?;
        let _gate = self.gate();
        *self.write_amount()? = data.monthly_budget;
        self.subscribers.publish(&data.monthly_budget);
        Ok(())
    }

    /// Current monthly budget
    pub fn get(&self) -> LedgerResult<Money> {
        self.amount
            .read()
            .map(|amount| *amount)
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    /// Set the budget from a user-entered number, rounded to cents.
    ///
    /// Returns the stored amount.
    pub fn set(&self, value: f64) -> LedgerResult<Money> {
        let amount = budget_from_input(value)?;
        self.set_amount(amount)?;
        Ok(amount)
    }

    /// Set the budget, returning the amount it replaced
    pub fn set_amount(&self, amount: Money) -> LedgerResult<Money> {
        if amount.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Budget cannot be negative ({})",
                amount
            )));
        }

        let _gate = self.gate();
        write_json_atomic(
            &self.path,
            &BudgetData {
                monthly_budget: amount,
            },
        )?;
        let previous = std::mem::replace(&mut *self.write_amount()?, amount);

        self.subscribers.publish(&amount);
        Ok(previous)
    }

    /// Observe the budget: the current value first, then each committed value
    pub fn subscribe<F>(&self, listener: F) -> LedgerResult<Subscription>
    where
        F: FnMut(&Money) + Send + 'static,
    {
        let _gate = self.gate();
        let current = self.get()?;
        self.subscribers.register(&current, Box::new(listener))
    }

    fn gate(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_amount(&self) -> LedgerResult<std::sync::RwLockWriteGuard<'_, Money>> {
        self.amount
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

/// Convert a user-entered budget to cents.
///
/// The sign is checked before rounding so that small negative inputs are
/// rejected rather than rounded to zero.
pub fn budget_from_input(value: f64) -> LedgerResult<Money> {
    if !value.is_finite() {
        return Err(LedgerError::Validation(format!(
            "Budget must be a finite number, got {}",
            value
        )));
    }
    if value < 0.0 {
        return Err(LedgerError::Validation(format!(
            "Budget cannot be negative ({})",
            value
        )));
    }
    Money::from_f64(value).ok_or_else(|| {
        LedgerError::Validation(format!("Budget is out of range: {}", value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, BudgetStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = BudgetStore::open(temp_dir.path().join("budget.json")).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_default_is_zero() {
        let (_temp_dir, store) = create_test_store();
        assert_eq!(store.get().unwrap(), Money::zero());
    }

    #[test]
    fn test_set_rounds_to_cents() {
        let (_temp_dir, store) = create_test_store();
        let stored = store.set(500.456).unwrap();
        assert_eq!(stored, Money::from_cents(50046));
        assert_eq!(store.get().unwrap(), Money::from_cents(50046));
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let (_temp_dir, store) = create_test_store();
        store.set(100.0).unwrap();

        assert!(store.set(-1.0).unwrap_err().is_validation());
        assert!(store.set(f64::NAN).unwrap_err().is_validation());
        assert!(store.set(f64::INFINITY).unwrap_err().is_validation());

        assert_eq!(store.get().unwrap(), Money::from_cents(10000));
    }

    #[test]
    fn test_set_rejects_negative_before_rounding() {
        let (_temp_dir, store) = create_test_store();
        store.set(75.0).unwrap();

        assert!(store.set(-0.004).unwrap_err().is_validation());
        assert!(store.set(-0.0001).unwrap_err().is_validation());

        assert_eq!(store.get().unwrap(), Money::from_cents(7500));
    }

    #[test]
    fn test_set_amount_returns_previous() {
        let (_temp_dir, store) = create_test_store();
        assert_eq!(store.set_amount(Money::from_cents(500)).unwrap(), Money::zero());
        assert_eq!(
            store.set_amount(Money::from_cents(900)).unwrap(),
            Money::from_cents(500)
        );
    }

    #[test]
    fn test_panicking_listener_does_not_block_updates() {
        let (_temp_dir, store) = create_test_store();
        let sub = store
            .subscribe(|amount| assert!(amount.is_zero(), "unexpected budget"))
            .unwrap();

        store.set(10.0).unwrap();
        store.set(20.0).unwrap();

        assert!(!sub.is_active());
        assert_eq!(store.get().unwrap(), Money::from_cents(2000));
    }

    #[test]
    fn test_zero_budget_allowed() {
        let (_temp_dir, store) = create_test_store();
        store.set(250.0).unwrap();
        store.set(0.0).unwrap();
        assert_eq!(store.get().unwrap(), Money::zero());
    }

    #[test]
    fn test_persistence_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.json");

        BudgetStore::open(path.clone()).unwrap().set(1200.0).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["monthly_budget"], 120000);

        let reopened = BudgetStore::open(path).unwrap();
        assert_eq!(reopened.get().unwrap(), Money::from_cents(120000));
    }

    #[test]
    fn test_subscribe() {
        let (_temp_dir, store) = create_test_store();
        store.set(10.0).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = store.subscribe(move |amount| sink.lock().unwrap().push(*amount)).unwrap();

        store.set(20.0).unwrap();
        let _ = store.set(-5.0);
        drop(sub);
        store.set(30.0).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![Money::from_cents(1000), Money::from_cents(2000)]
        );
    }
}
