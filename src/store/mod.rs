//! Defines the expense store trait and its implementations.
//!
//! The monthly totals, month summary and paged listing only ever read from
//! the store through [ExpenseStore], so they can be run against either the
//! SQLite store used by the server or the in-memory store used in tests.

mod memory;
mod sqlite;

use std::{fmt::Debug, sync::Arc};

pub use memory::InMemoryExpenseStore;
pub use sqlite::{SQLiteExpenseStore, create_expense_table};

use crate::{
    Error,
    expense::{Expense, ExpenseId, NewExpense},
    month::DateWindow,
};

/// Handles the creation, retrieval, update and deletion of expenses.
///
/// Implementations must return expenses from [ExpenseStore::get_all] and
/// [ExpenseStore::get_in_window] ordered by date, then ID, ascending and from
/// [ExpenseStore::get_page] ordered by date, then ID, descending.
pub trait ExpenseStore: Debug + Send + Sync {
    /// Add an expense to the store and assign it an ID.
    fn create(&self, expense: NewExpense) -> Result<Expense, Error>;

    /// Retrieve a single expense.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no expense with `id`.
    fn get(&self, id: ExpenseId) -> Result<Expense, Error>;

    /// Replace every field of the expense with `id`.
    ///
    /// # Errors
    /// Returns [Error::UpdateMissingExpense] if there is no expense with `id`.
    fn update(&self, id: ExpenseId, expense: NewExpense) -> Result<Expense, Error>;

    /// Remove the expense with `id`.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingExpense] if there is no expense with `id`.
    fn delete(&self, id: ExpenseId) -> Result<(), Error>;

    /// Every expense in the store.
    fn get_all(&self) -> Result<Vec<Expense>, Error>;

    /// The expenses dated within `window`, i.e. `window.start <= date < window.end`.
    fn get_in_window(&self, window: DateWindow) -> Result<Vec<Expense>, Error>;

    /// Up to `limit` expenses after skipping the first `offset`, newest first.
    fn get_page(&self, limit: u64, offset: u64) -> Result<Vec<Expense>, Error>;

    /// The number of expenses in the store.
    fn count(&self) -> Result<u64, Error>;
}

/// An expense store that can be shared between request handlers.
pub type SharedExpenseStore = Arc<dyn ExpenseStore>;
