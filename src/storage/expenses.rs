//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json and publishes a full
//! ordered snapshot to subscribers after every committed mutation.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseId, NewExpense};

use super::file_io::{read_json, write_json_atomic};
use super::observable::{Subscribers, Subscription};

/// Immutable, shareable view of the expense collection
pub type ExpenseSnapshot = Arc<Vec<Expense>>;

/// On-disk layout: expenses in insertion order plus the id counter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ExpenseTable {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    expenses: Vec<Expense>,
}

impl ExpenseTable {
    /// Raise the counter past every id in the table
    fn normalize(mut self) -> Self {
        let max_seen = self.expenses.iter().map(|e| e.id.raw()).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_seen + 1).max(1);
        self
    }

    fn position(&self, id: ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| e.id == id)
    }

    /// Most recent first; equal dates keep insertion order
    fn ordered(&self) -> ExpenseSnapshot {
        let mut ordered = self.expenses.clone();
        ordered.sort_by(|a, b| b.date.cmp(&a.date));
        Arc::new(ordered)
    }
}

struct State {
    table: ExpenseTable,
    ordered: ExpenseSnapshot,
}

impl State {
    fn new(table: ExpenseTable) -> Self {
        let ordered = table.ordered();
        Self { table, ordered }
    }
}

/// Persisted, observable collection of expenses
pub struct ExpenseStore {
    path: PathBuf,
    state: RwLock<State>,
    /// Serializes mutations and registrations so that notifications follow
    /// commit order
    write_gate: Mutex<()>,
    subscribers: Subscribers<ExpenseSnapshot>,
}

impl ExpenseStore {
    /// Create an empty store backed by `path` (nothing is read until `load`)
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(State::new(ExpenseTable::default().normalize())),
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

    /// Load expenses from disk, replacing the in-memory state.
    ///
    /// Records are kept as stored, including legacy rows whose date is not in
    /// the canonical encoding.
    pub fn load(&self) -> LedgerResult<()> {
        let table: ExpenseTable = read_json(&self.path)?;
        let _gate = self.gate();

        let snapshot = {
            let mut state = self.write_state()?;
            *state = State::new(table.normalize());
            Arc::clone(&state.ordered)
        };

        self.subscribers.publish(&snapshot);
        Ok(())
    }

    /// Record a new expense and return its assigned id
    pub fn insert(&self, input: NewExpense) -> LedgerResult<ExpenseId> {
        input
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.mutate(|table| {
            let assigned = ExpenseId::from_raw(table.next_id);
            table.next_id += 1;
            table.expenses.push(input.into_expense(assigned));
            Ok(assigned)
        })
    }

    /// Replace the stored record that has `expense.id`, returning the record
    /// it replaced
    pub fn update(&self, expense: Expense) -> LedgerResult<Expense> {
        expense
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.mutate(|table| {
            let index = table
                .position(expense.id)
                .ok_or_else(|| LedgerError::expense_not_found(expense.id.to_string()))?;
            Ok(std::mem::replace(&mut table.expenses[index], expense))
        })
    }

    /// Remove the stored record that has `expense.id`, returning it as stored
    pub fn delete(&self, expense: &Expense) -> LedgerResult<Expense> {
        self.delete_by_id(expense.id)
    }

    /// Remove the record with `id`
    pub fn delete_by_id(&self, id: ExpenseId) -> LedgerResult<Expense> {
        self.mutate(|table| {
            let index = table
                .position(id)
                .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;
            Ok(table.expenses.remove(index))
        })
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> LedgerResult<Option<Expense>> {
        let state = self.read_state()?;
        Ok(state.table.position(id).map(|i| state.table.expenses[i].clone()))
    }

    /// All expenses, most recent first
    pub fn all(&self) -> LedgerResult<ExpenseSnapshot> {
        Ok(Arc::clone(&self.read_state()?.ordered))
    }

    /// The `n` most recent expenses
    pub fn recent(&self, n: usize) -> LedgerResult<ExpenseSnapshot> {
        Ok(truncated(&self.all()?, n))
    }

    pub fn count(&self) -> LedgerResult<usize> {
        Ok(self.read_state()?.table.expenses.len())
    }

    /// Observe the full ordered collection.
    ///
    /// `listener` receives the current snapshot before this returns, then one
    /// snapshot per committed mutation in commit order. It may read the store
    /// but must not mutate it or subscribe to it.
    pub fn subscribe<F>(&self, listener: F) -> LedgerResult<Subscription>
    where
        F: FnMut(&ExpenseSnapshot) + Send + 'static,
    {
        let _gate = self.gate();
        let current = self.all()?;
        self.subscribers.register(&current, Box::new(listener))
    }

    /// Observe the `n` most recent expenses
    pub fn subscribe_recent<F>(&self, n: usize, mut listener: F) -> LedgerResult<Subscription>
    where
        F: FnMut(&ExpenseSnapshot) + Send + 'static,
    {
        self.subscribe(move |snapshot: &ExpenseSnapshot| listener(&truncated(snapshot, n)))
    }

    /// Apply `change` to a copy of the table, persist it, commit, notify.
    ///
    /// A failed write leaves the file and the in-memory state untouched. Once
    /// the file is written the call succeeds; listener failures are contained
    /// by the subscriber registry.
    fn mutate<R, F>(&self, change: F) -> LedgerResult<R>
    where
        F: FnOnce(&mut ExpenseTable) -> LedgerResult<R>,
    {
        let _gate = self.gate();

        let mut next = self.read_state()?.table.clone();
        let result = change(&mut next)?;
        write_json_atomic(&self.path, &next)?;

        let snapshot = {
            let mut state = self.write_state()?;
            *state = State::new(next);
            Arc::clone(&state.ordered)
        };

        self.subscribers.publish(&snapshot);
        Ok(result)
    }

    /// The gate guards no data, so a poisoned gate is still usable
    fn gate(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_state(&self) -> LedgerResult<std::sync::RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_state(&self) -> LedgerResult<std::sync::RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

fn truncated(snapshot: &ExpenseSnapshot, n: usize) -> ExpenseSnapshot {
    if n >= snapshot.len() {
        Arc::clone(snapshot)
    } else {
        Arc::new(snapshot[..n].to_vec())
    }
}
