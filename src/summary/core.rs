//! The expenses and total for a single calendar month.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::{
    Error,
    amount::Amount,
    expense::Expense,
    month::{DateWindow, MonthYear},
    store::ExpenseStore,
};

/// Pick the month to summarise.
///
/// A missing `month` or `year` is taken from `today`, independently of the other.
///
/// # Errors
/// Returns [Error::InvalidMonth] or [Error::InvalidYear] if the values are out of range.
pub fn resolve_month(month: Option<u8>, year: Option<i32>, today: Date) -> Result<MonthYear, Error> {
    let current = MonthYear::of(today);

    MonthYear::new(
        month.unwrap_or(current.month()),
        year.unwrap_or(current.year()),
    )
}

/// The total spent in one category during the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// The category label shared by the expenses.
    pub category: String,
    /// The sum of their amounts.
    pub total: Amount,
}

/// The expenses dated within a month and their total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// The month that was summarised, e.g. "2/2024".
    pub month: MonthYear,
    /// The dates covered, `[first of the month, first of the next month)`.
    pub window: DateWindow,
    /// The expenses in the month, oldest first.
    pub expenses: Vec<Expense>,
    /// The sum of the amounts of `expenses`.
    pub total: Amount,
    /// The total for each category in `expenses`, sorted by category name.
    pub category_totals: Vec<CategoryTotal>,
    /// The month before `month`.
    pub previous: MonthYear,
    /// The month after `month`.
    pub next: MonthYear,
}

/// Get the expenses and total for `month`.
///
/// A month with no expenses has an empty list and a total of zero.
///
/// # Errors
/// Returns any error raised by the store.
pub fn get_monthly_summary(
    store: &dyn ExpenseStore,
    month: MonthYear,
) -> Result<MonthlySummary, Error> {
    let window = month.window()?;
    let expenses = store.get_in_window(window)?;
    let total = expenses.iter().map(|expense| expense.amount).sum();

    let mut by_category: BTreeMap<&str, Amount> = BTreeMap::new();
    for expense in &expenses {
        *by_category.entry(expense.category.as_str()).or_default() += expense.amount;
    }
    let category_totals = by_category
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_owned(),
            total,
        })
        .collect();

    Ok(MonthlySummary {
        month,
        window,
        expenses,
        total,
        category_totals,
        previous: month.previous(),
        next: month.next(),
    })
}
