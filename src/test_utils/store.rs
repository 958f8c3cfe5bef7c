use rust_decimal::Decimal;
use time::Date;

use crate::{
    Error,
    amount::Amount,
    expense::{Expense, ExpenseId, NewExpense},
    month::DateWindow,
    store::{ExpenseStore, InMemoryExpenseStore},
};

/// A store where every operation fails as if the database were unavailable.
#[derive(Debug)]
pub(crate) struct FailingExpenseStore;

impl ExpenseStore for FailingExpenseStore {
    fn create(&self, _: NewExpense) -> Result<Expense, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get(&self, _: ExpenseId) -> Result<Expense, Error> {
        Err(Error::DatabaseLockError)
    }

    fn update(&self, _: ExpenseId, _: NewExpense) -> Result<Expense, Error> {
        Err(Error::DatabaseLockError)
    }

    fn delete(&self, _: ExpenseId) -> Result<(), Error> {
        Err(Error::DatabaseLockError)
    }

    fn get_all(&self) -> Result<Vec<Expense>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get_in_window(&self, _: DateWindow) -> Result<Vec<Expense>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get_page(&self, _: u64, _: u64) -> Result<Vec<Expense>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn count(&self) -> Result<u64, Error> {
        Err(Error::DatabaseLockError)
    }
}

/// Create an in-memory store holding an expense for each `(name, amount, date, category)`.
#[track_caller]
pub(crate) fn store_with_expenses(
    expenses: &[(&str, Decimal, Date, &str)],
) -> InMemoryExpenseStore {
    let store = InMemoryExpenseStore::new();

    for &(name, amount, date, category) in expenses {
        let expense = NewExpense::new(name, Amount::new(amount), date, category)
            .expect("Could not create test expense");
        store.create(expense).expect("Could not insert test expense");
    }

    store
}
