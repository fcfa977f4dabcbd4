//! Background write queue
//!
//! A single worker thread applies ledger mutations in submission order, so
//! the presentation layer never blocks on disk I/O. Each submission returns a
//! `PendingWrite` that reports the outcome, including failures.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseId, Money, NewExpense};

use super::ledger::Ledger;

/// A mutation to apply to the ledger
#[derive(Debug, Clone)]
pub enum WriteCommand {
    AddExpense(NewExpense),
    UpdateExpense(Expense),
    DeleteExpense(Expense),
    /// User-entered budget value
    SetBudget(f64),
}

/// Result of an applied command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Inserted(ExpenseId),
    Updated,
    Deleted,
    BudgetSet(Money),
}

struct Job {
    command: WriteCommand,
    reply: Sender<LedgerResult<WriteOutcome>>,
}

/// Outcome of a submitted command, available once the worker applied it
#[must_use = "a PendingWrite reports whether the write failed"]
pub struct PendingWrite {
    reply: Receiver<LedgerResult<WriteOutcome>>,
}

impl PendingWrite {
    /// Block until the command has been applied
    pub fn wait(self) -> LedgerResult<WriteOutcome> {
        self.reply.recv().map_err(|_| {
            LedgerError::Storage("Write queue stopped before applying the write".into())
        })?
    }

    /// The outcome if the command has already been applied
    pub fn try_outcome(&self) -> Option<LedgerResult<WriteOutcome>> {
        self.reply.try_recv().ok()
    }
}

/// Single-writer queue in front of a `Ledger`
pub struct WriteQueue {
    sender: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl WriteQueue {
    /// Start the worker thread
    pub fn spawn(ledger: Arc<Ledger>) -> LedgerResult<Self> {
        let (sender, receiver) = mpsc::channel::<Job>();

        let worker = std::thread::Builder::new()
            .name("ledger-writer".into())
            .spawn(move || {
                for job in receiver {
                    let outcome = apply(&ledger, job.command);
                    // The submitter may have dropped its PendingWrite; the
                    // write is complete either way
                    let _ = job.reply.send(outcome);
                }
            })
            .map_err(|e| LedgerError::Io(format!("Failed to start write queue: {}", e)))?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Queue a command; it is applied after every earlier submission
    pub fn submit(&self, command: WriteCommand) -> LedgerResult<PendingWrite> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| LedgerError::Storage("Write queue is shut down".into()))?;

        let (reply, receiver) = mpsc::channel();
        sender
            .send(Job { command, reply })
            .map_err(|_| LedgerError::Storage("Write queue worker has stopped".into()))?;

        Ok(PendingWrite { reply: receiver })
    }

    pub fn add_expense(&self, input: NewExpense) -> LedgerResult<PendingWrite> {
        self.submit(WriteCommand::AddExpense(input))
    }

    pub fn update_expense(&self, expense: Expense) -> LedgerResult<PendingWrite> {
        self.submit(WriteCommand::UpdateExpense(expense))
    }

    pub fn delete_expense(&self, expense: Expense) -> LedgerResult<PendingWrite> {
        self.submit(WriteCommand::DeleteExpense(expense))
    }

    pub fn set_budget(&self, value: f64) -> LedgerResult<PendingWrite> {
        self.submit(WriteCommand::SetBudget(value))
    }

    /// Apply every queued command, then stop the worker
    pub fn shutdown(mut self) -> LedgerResult<()> {
        self.stop()
    }

    fn stop(&mut self) -> LedgerResult<()> {
        // Closing the channel ends the worker loop after the backlog
        self.sender.take();
        match self.worker.take() {
            Some(worker) => worker
                .join()
                .map_err(|_| LedgerError::Storage("Write queue worker panicked".into())),
            None => Ok(()),
        }
    }
}

impl Drop for WriteQueue {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

fn apply(ledger: &Ledger, command: WriteCommand) -> LedgerResult<WriteOutcome> {
    match command {
        WriteCommand::AddExpense(input) => ledger
            .add_expense(input)
            .map(|expense| WriteOutcome::Inserted(expense.id)),
        WriteCommand::UpdateExpense(expense) => {
            ledger.update_expense(expense).map(|_| WriteOutcome::Updated)
        }
        WriteCommand::DeleteExpense(expense) => {
            ledger.delete_expense(&expense).map(|_| WriteOutcome::Deleted)
        }
        WriteCommand::SetBudget(value) => ledger.set_budget(value).map(WriteOutcome::BudgetSet),
    }
}
