//! Ledger service
//!
//! Composition root for the application: owns storage, settings and the
//! audit logger, applies input defaulting, and records every committed
//! mutation in the audit log.
//!
//! The result of a mutation reflects the store only. An audit append that
//! fails after the commit is kept aside and reported through
//! `take_audit_failures`.

use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, Money, NewExpense};
use crate::reports::Dashboard;
use crate::storage::{budget_from_input, BudgetStore, ExpenseStore, Storage};

/// Audit identifier of the single budget record
const BUDGET_ENTITY_ID: &str = "monthly";

/// The ledger: stores, settings and audit log behind one handle
pub struct Ledger {
    storage: Storage,
    settings: Settings,
    audit: AuditLogger,
    audit_failures: Mutex<Vec<LedgerError>>,
}

impl Ledger {
    /// Open the ledger at `paths`, creating directories and default
    /// settings on first use
    pub fn open(paths: LedgerPaths) -> LedgerResult<Self> {
        let first_run = !paths.is_initialized();
        let settings = Settings::load_or_create(&paths)?;

        let storage = Storage::open(paths)?;
        if first_run {
            settings.save(storage.paths())?;
        }

        let audit = AuditLogger::new(storage.paths().audit_log());

        Ok(Self {
            storage,
            settings,
            audit,
            audit_failures: Mutex::new(Vec::new()),
        })
    }

    /// Open the ledger at the default location
    pub fn open_default() -> LedgerResult<Self> {
        Self::open(LedgerPaths::new()?)
    }

    pub fn expenses(&self) -> &ExpenseStore {
        &self.storage.expenses
    }

    pub fn budget(&self) -> &BudgetStore {
        &self.storage.budget
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn paths(&self) -> &LedgerPaths {
        self.storage.paths()
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a new expense; a blank name becomes the configured default
    pub fn add_expense(&self, input: NewExpense) -> LedgerResult<Expense> {
        let input = input.with_default_name(&self.settings.default_expense_name);
        let id = self.storage.expenses.insert(input.clone())?;
        let expense = input.into_expense(id);

        self.log_create(EntityType::Expense, id.to_string(), Some(expense.name.clone()), &expense);

        Ok(expense)
    }

    /// Replace an existing expense
    pub fn update_expense(&self, mut expense: Expense) -> LedgerResult<Expense> {
        if expense.name.trim().is_empty() {
            expense.name = self.settings.default_expense_name.clone();
        }

        let before = self.storage.expenses.update(expense.clone())?;

        let diff = match (serde_json::to_value(&before), serde_json::to_value(&expense)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &before,
            &expense,
            diff,
        );

        Ok(expense)
    }

    /// Delete an expense, returning the record that was removed
    pub fn delete_expense(&self, expense: &Expense) -> LedgerResult<Expense> {
        let removed = self.storage.expenses.delete(expense)?;

        self.log_delete(
            EntityType::Expense,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        );

        Ok(removed)
    }

    /// Set the monthly budget from a user-entered number
    pub fn set_budget(&self, value: f64) -> LedgerResult<Money> {
        let amount = budget_from_input(value)?;
        self.set_budget_amount(amount)?;
        Ok(amount)
    }

    /// Set the monthly budget
    pub fn set_budget_amount(&self, amount: Money) -> LedgerResult<()> {
        let before = self.storage.budget.set_amount(amount)?;

        let diff = (before != amount).then(|| format!("{} -> {}", before, amount));
        self.log_update(
            EntityType::Budget,
            BUDGET_ENTITY_ID,
            None,
            &before,
            &amount,
            diff,
        );
        Ok(())
    }

    /// Derived view for `reference_date` from the current snapshot
    pub fn dashboard(&self, reference_date: NaiveDate) -> LedgerResult<Dashboard> {
        let expenses = self.storage.expenses.all()?;
        let budget = self.storage.budget.get()?;
        Ok(Dashboard::build(&expenses, budget, reference_date, &self.settings))
    }

    /// Derived view for today's local date
    pub fn dashboard_today(&self) -> LedgerResult<Dashboard> {
        self.dashboard(chrono::Local::now().date_naive())
    }

    /// Audit appends that failed after their mutation was committed, oldest
    /// first. Draining them is the caller's job.
    pub fn take_audit_failures(&self) -> Vec<LedgerError> {
        std::mem::take(&mut *self.failures())
    }

    fn failures(&self) -> std::sync::MutexGuard<'_, Vec<LedgerError>> {
        self.audit_failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn record_audit(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.log(&entry) {
            self.failures().push(e);
        }
    }

    fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        if self.settings.audit_enabled {
            self.record_audit(AuditEntry::create(entity_type, entity_id, entity_name, entity));
        }
    }

    fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff: Option<String>,
    ) {
        if self.settings.audit_enabled {
            self.record_audit(AuditEntry::update(
                entity_type,
                entity_id,
                entity_name,
                before,
                after,
                diff,
            ));
        }
    }

    fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        if self.settings.audit_enabled {
            self.record_audit(AuditEntry::delete(entity_type, entity_id, entity_name, entity));
        }
    }
}
