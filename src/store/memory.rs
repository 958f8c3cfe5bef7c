//! An expense store that keeps its records in memory.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    Error,
    expense::{Expense, ExpenseId, NewExpense},
    month::DateWindow,
    store::ExpenseStore,
};

#[derive(Debug, Default)]
struct Records {
    expenses: Vec<Expense>,
    last_id: ExpenseId,
}

/// Keeps expenses in memory. Nothing is persisted.
///
/// IDs start at 1 and are never reused, matching [SQLiteExpenseStore](crate::store::SQLiteExpenseStore).
#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    records: RwLock<Records>,
}

impl InMemoryExpenseStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Records>, Error> {
        self.records
            .read()
            .inspect_err(|error| tracing::error!("could not acquire expense store lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Records>, Error> {
        self.records
            .write()
            .inspect_err(|error| tracing::error!("could not acquire expense store lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }

    fn sorted_ascending(&self) -> Result<Vec<Expense>, Error> {
        let mut expenses = self.read()?.expenses.clone();
        expenses.sort_by_key(|expense| (expense.date, expense.id));

        Ok(expenses)
    }
}

impl ExpenseStore for InMemoryExpenseStore {
    fn create(&self, expense: NewExpense) -> Result<Expense, Error> {
        let mut records = self.write()?;
        records.last_id += 1;
        let expense = expense.into_expense(records.last_id);
        records.expenses.push(expense.clone());

        Ok(expense)
    }

    fn get(&self, id: ExpenseId) -> Result<Expense, Error> {
        self.read()?
            .expenses
            .iter()
            .find(|expense| expense.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn update(&self, id: ExpenseId, expense: NewExpense) -> Result<Expense, Error> {
        let mut records = self.write()?;
        let stored = records
            .expenses
            .iter_mut()
            .find(|expense| expense.id == id)
            .ok_or(Error::UpdateMissingExpense)?;
        *stored = expense.into_expense(id);

        Ok(stored.clone())
    }

    fn delete(&self, id: ExpenseId) -> Result<(), Error> {
        let mut records = self.write()?;
        let index = records
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(Error::DeleteMissingExpense)?;
        records.expenses.remove(index);

        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Expense>, Error> {
        self.sorted_ascending()
    }

    fn get_in_window(&self, window: DateWindow) -> Result<Vec<Expense>, Error> {
        let mut expenses = self.sorted_ascending()?;
        expenses.retain(|expense| window.contains(expense.date));

        Ok(expenses)
    }

    fn get_page(&self, limit: u64, offset: u64) -> Result<Vec<Expense>, Error> {
        let limit = usize::try_from(limit).map_err(|_| Error::InvalidLimit(limit.to_string()))?;
        let offset = usize::try_from(offset).map_err(|_| Error::InvalidPage(offset.to_string()))?;
        let mut expenses = self.sorted_ascending()?;
        expenses.reverse();

        Ok(expenses.into_iter().skip(offset).take(limit).collect())
    }

    fn count(&self) -> Result<u64, Error> {
        Ok(self.read()?.expenses.len() as u64)
    }
}
