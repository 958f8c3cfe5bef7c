//! The expense record and the validated input for creating or replacing one.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, amount::Amount};

/// The identifier the store assigns to an expense.
pub type ExpenseId = i64;

/// A dated, categorised amount of money spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Assigned by the store on creation and never changed.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub name: String,
    /// How much was spent. Zero and negative amounts (e.g. refunds) are allowed.
    pub amount: Amount,
    /// The day the money was spent.
    pub date: Date,
    /// A free-form grouping label, e.g. "Groceries".
    pub category: String,
}

/// The fields of an expense that has been validated but not yet stored.
///
/// Names and categories are trimmed and guaranteed to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    name: String,
    amount: Amount,
    date: Date,
    category: String,
}

impl NewExpense {
    /// Validate the fields of an expense.
    ///
    /// # Errors
    /// Returns [Error::EmptyExpenseName] or [Error::EmptyCategory] if either
    /// label is empty after trimming whitespace, and [Error::InvalidAmount] if
    /// `amount` is larger than [Amount::MAX] in either direction.
    pub fn new(name: &str, amount: Amount, date: Date, category: &str) -> Result<Self, Error> {
        if !amount.is_within_limit() {
            return Err(Error::InvalidAmount(amount.to_string()));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyExpenseName);
        }

        let category = category.trim();
        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        Ok(Self {
            name: name.to_owned(),
            amount,
            date,
            category: category.to_owned(),
        })
    }

    /// The trimmed name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The amount spent.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The day the money was spent.
    pub fn date(&self) -> Date {
        self.date
    }

    /// The trimmed category label.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Attach the store-assigned `id`.
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            name: self.name,
            amount: self.amount,
            date: self.date,
            category: self.category,
        }
    }
}
