//! Totals the amount spent in each calendar month.

use std::collections::{BTreeMap, btree_map};

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{Error, amount::Amount, expense::Expense, month::MonthYear, store::ExpenseStore};

/// The total spent in each month that has at least one expense.
///
/// Iterates in ascending order of `(year, month)` and serializes as a JSON
/// object keyed by `"month/year"` in that same order, e.g.
/// `{"12/2023": "10.00", "1/2024": "4.50"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyTotals(BTreeMap<MonthYear, Amount>);

impl MonthlyTotals {
    /// The total for `month`, if any expense falls in it.
    pub fn get(&self, month: MonthYear) -> Option<Amount> {
        self.0.get(&month).copied()
    }

    /// Iterate over the months and their totals, oldest month first.
    pub fn iter(&self) -> btree_map::Iter<'_, MonthYear, Amount> {
        self.0.iter()
    }

    /// The number of months with expenses.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no months, i.e. there are no expenses.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The sum over every month.
    pub fn grand_total(&self) -> Amount {
        self.0.values().sum()
    }
}

impl<'a> IntoIterator for &'a MonthlyTotals {
    type Item = (&'a MonthYear, &'a Amount);
    type IntoIter = btree_map::Iter<'a, MonthYear, Amount>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for MonthlyTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (month, total) in &self.0 {
            map.serialize_entry(&month.to_string(), total)?;
        }

        map.end()
    }
}

/// Sum the amounts of `expenses` by the month and year of their dates.
pub fn aggregate_by_month(expenses: &[Expense]) -> MonthlyTotals {
    let mut totals = BTreeMap::new();

    for expense in expenses {
        *totals
            .entry(MonthYear::of(expense.date))
            .or_insert(Amount::ZERO) += expense.amount;
    }

    MonthlyTotals(totals)
}

/// Get the total spent in each month across every expense in `store`.
///
/// # Errors
/// Returns any error raised by the store.
pub fn get_monthly_totals(store: &dyn ExpenseStore) -> Result<MonthlyTotals, Error> {
    let expenses = store.get_all()?;

    Ok(aggregate_by_month(&expenses))
}


#[cfg(test)]
mod get_monthly_totals_tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        amount::Amount,
        month::MonthYear,
        monthly_totals::get_monthly_totals,
        store::InMemoryExpenseStore,
        test_utils::{FailingExpenseStore, store_with_expenses},
    };

    #[test]
    fn totals_every_expense_in_store() {
        let store = store_with_expenses(&[
            ("Rent", dec!(1500), date!(2024 - 01 - 01), "Housing"),
            ("Power", dec!(120.35), date!(2024 - 01 - 20), "Utilities"),
            ("Rent", dec!(1500), date!(2024 - 02 - 01), "Housing"),
        ]);

        let totals = get_monthly_totals(&store).unwrap();

        assert_eq!(
            totals.get(MonthYear::new(1, 2024).unwrap()),
            Some(Amount::new(dec!(1620.35)))
        );
        assert_eq!(totals.grand_total(), Amount::new(dec!(3120.35)));
    }

    #[test]
    fn empty_store_gives_empty_totals() {
        let totals = get_monthly_totals(&InMemoryExpenseStore::new()).unwrap();

        assert!(totals.is_empty());
    }

    #[test]
    fn is_idempotent() {
        let store = store_with_expenses(&[
            ("a", dec!(1.10), date!(2024 - 01 - 01), "Misc"),
            ("b", dec!(2.20), date!(2024 - 05 - 01), "Misc"),
        ]);

        assert_eq!(get_monthly_totals(&store), get_monthly_totals(&store));
    }

    #[test]
    fn store_errors_are_returned() {
        assert_eq!(
            get_monthly_totals(&FailingExpenseStore),
            Err(Error::DatabaseLockError)
        );
    }
}
