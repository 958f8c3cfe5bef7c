//! Implements a SQLite backed expense store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row, params};

use crate::{
    Error,
    expense::{Expense, ExpenseId, NewExpense},
    month::DateWindow,
    store::ExpenseStore,
};

/// Stores expenses in a SQLite database.
///
/// The `expense` table must exist, see [create_expense_table].
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

/// Create the expense table in the database.
///
/// Amounts are stored as decimal text so that no precision is lost.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                amount TEXT NOT NULL,
                date TEXT NOT NULL,
                category TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date)",
        (),
    )?;

    Ok(())
}

fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        name: row.get(1)?,
        amount: row.get(2)?,
        date: row.get(3)?,
        category: row.get(4)?,
    })
}

impl ExpenseStore for SQLiteExpenseStore {
    fn create(&self, expense: NewExpense) -> Result<Expense, Error> {
        let connection = self.lock()?;

        let expense = connection
            .prepare(
                "INSERT INTO expense (name, amount, date, category)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, name, amount, date, category",
            )?
            .query_row(
                params![
                    expense.name(),
                    expense.amount(),
                    expense.date(),
                    expense.category()
                ],
                map_expense_row,
            )?;

        Ok(expense)
    }

    fn get(&self, id: ExpenseId) -> Result<Expense, Error> {
        let connection = self.lock()?;

        let expense = connection
            .prepare("SELECT id, name, amount, date, category FROM expense WHERE id = ?1")?
            .query_row([id], map_expense_row)?;

        Ok(expense)
    }

    fn update(&self, id: ExpenseId, expense: NewExpense) -> Result<Expense, Error> {
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            "UPDATE expense SET name = ?1, amount = ?2, date = ?3, category = ?4 WHERE id = ?5",
            params![
                expense.name(),
                expense.amount(),
                expense.date(),
                expense.category(),
                id
            ],
        )?;

        if rows_affected == 0 {
            return Err(Error::UpdateMissingExpense);
        }

        Ok(expense.into_expense(id))
    }

    fn delete(&self, id: ExpenseId) -> Result<(), Error> {
        let connection = self.lock()?;

        let rows_affected = connection.execute("DELETE FROM expense WHERE id = ?1", [id])?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingExpense);
        }

        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Expense>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(
                "SELECT id, name, amount, date, category FROM expense ORDER BY date ASC, id ASC",
            )?
            .query_map([], map_expense_row)?
            .map(|expense_result| expense_result.map_err(Error::from))
            .collect()
    }

    fn get_in_window(&self, window: DateWindow) -> Result<Vec<Expense>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(
                "SELECT id, name, amount, date, category FROM expense
                 WHERE date >= ?1 AND date < ?2
                 ORDER BY date ASC, id ASC",
            )?
            .query_map(params![window.start, window.end], map_expense_row)?
            .map(|expense_result| expense_result.map_err(Error::from))
            .collect()
    }

    fn get_page(&self, limit: u64, offset: u64) -> Result<Vec<Expense>, Error> {
        let limit = i64::try_from(limit).map_err(|_| Error::InvalidLimit(limit.to_string()))?;
        let offset = i64::try_from(offset).map_err(|_| Error::InvalidPage(offset.to_string()))?;
        let connection = self.lock()?;

        connection
            .prepare(
                "SELECT id, name, amount, date, category FROM expense
                 ORDER BY date DESC, id DESC
                 LIMIT ?1 OFFSET ?2",
            )?
            .query_map([limit, offset], map_expense_row)?
            .map(|expense_result| expense_result.map_err(Error::from))
            .collect()
    }

    fn count(&self) -> Result<u64, Error> {
        let connection = self.lock()?;

        let count: i64 =
            connection.query_row("SELECT COUNT(id) FROM expense", [], |row| row.get(0))?;

        u64::try_from(count)
            .map_err(|_| Error::SqlError(rusqlite::Error::IntegralValueOutOfRange(0, count)))
    }
}
