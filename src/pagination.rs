//! Splits the expense listing into pages.

use serde::Serialize;

use crate::{Error, expense::Expense, store::ExpenseStore};

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum expenses to display per page when not specified in a request.
    pub default_page_size: u64,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_pages: 5,
        }
    }
}

/// A validated request for one page of the expense listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Create a request for page number `page` (starting from 1) with up to
    /// `limit` expenses per page.
    ///
    /// # Errors
    /// Returns [Error::InvalidPage] if `page` is zero or the page would start
    /// past the largest offset SQLite accepts, and [Error::InvalidLimit] if
    /// `limit` is zero or too large.
    pub fn new(page: u64, limit: u64) -> Result<Self, Error> {
        const MAX_ROWS: u64 = i64::MAX as u64;

        if page == 0 {
            return Err(Error::InvalidPage(page.to_string()));
        }

        if limit == 0 || limit > MAX_ROWS {
            return Err(Error::InvalidLimit(limit.to_string()));
        }

        match (page - 1).checked_mul(limit) {
            Some(offset) if offset <= MAX_ROWS => Ok(Self { page, limit }),
            _ => Err(Error::InvalidPage(page.to_string())),
        }
    }

    /// The page number, starting from 1.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The maximum number of expenses on the page.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// The number of expenses that come before this page.
    pub fn offset(&self) -> u64 {
        // Cannot overflow, checked in `new`.
        (self.page - 1) * self.limit
    }
}

/// The number of pages needed to show `total_count` items, `limit` at a time.
///
/// Zero items need zero pages.
pub fn page_count(total_count: u64, limit: u64) -> u64 {
    total_count.div_ceil(limit)
}

/// One page of the expense listing, newest expenses first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpensePage {
    /// The expenses on this page, empty if the page is past the last page.
    pub expenses: Vec<Expense>,
    /// The requested page number.
    pub page: u64,
    /// The requested page size.
    pub limit: u64,
    /// The number of pages needed for every expense in the store.
    pub page_count: u64,
    /// The number of expenses in the store.
    pub total_count: u64,
}

/// Get one page of expenses from `store`.
///
/// A page past the last page is not an error, it has no expenses.
///
/// # Errors
/// Returns any error raised by the store.
pub fn get_expense_page(
    store: &dyn ExpenseStore,
    request: PageRequest,
) -> Result<ExpensePage, Error> {
    let total_count = store.count()?;
    let expenses = store.get_page(request.limit(), request.offset())?;

    Ok(ExpensePage {
        expenses,
        page: request.page(),
        limit: request.limit(),
        page_count: page_count(total_count, request.limit()),
        total_count,
    })
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(u64),
    BackButton(u64),
}

pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let mut indicators: Vec<PaginationIndicator> = if page_count <= max_pages {
        (1..=page_count).map(map_page).collect()
    } else if curr_page <= (max_pages / 2) {
        (1..=max_pages).map(map_page).collect()
    } else if curr_page > (page_count - max_pages / 2) {
        ((page_count - max_pages + 1)..=page_count)
            .map(map_page)
            .collect()
    } else {
        ((curr_page - max_pages / 2)..=(curr_page + max_pages / 2))
            .map(map_page)
            .collect()
    };

    if page_count > max_pages {
        if curr_page > (max_pages / 2) + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < (page_count - max_pages / 2) {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    if curr_page > 1 {
        indicators.insert(0, PaginationIndicator::BackButton(curr_page - 1));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}


#[cfg(test)]
mod get_expense_page_tests {
    use rust_decimal_macros::dec;
    use time::{Date, Duration, macros::date};

    use crate::{
        Error,
        amount::Amount,
        expense::NewExpense,
        pagination::{PageRequest, get_expense_page, page_count},
        store::{ExpenseStore, InMemoryExpenseStore},
        test_utils::FailingExpenseStore,
    };

    fn store_with_daily_expenses(count: i64) -> InMemoryExpenseStore {
        let store = InMemoryExpenseStore::new();
        let start = date!(2024 - 01 - 01);

        for i in 0..count {
            let expense = NewExpense::new(
                &format!("Expense {i}"),
                Amount::new(dec!(1.25)),
                start + Duration::days(i),
                "Misc",
            )
            .unwrap();
            store.create(expense).unwrap();
        }

        store
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(25, 10), 3);
        assert_eq!(page_count(30, 10), 3);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(0, 10), 0);
    }

    #[test]
    fn twenty_five_expenses_make_three_pages() {
        let store = store_with_daily_expenses(25);

        let first = get_expense_page(&store, PageRequest::new(1, 10).unwrap()).unwrap();
        let last = get_expense_page(&store, PageRequest::new(3, 10).unwrap()).unwrap();
        let past_end = get_expense_page(&store, PageRequest::new(4, 10).unwrap()).unwrap();

        assert_eq!(first.page_count, 3);
        assert_eq!(first.total_count, 25);
        assert_eq!(first.expenses.len(), 10);
        assert_eq!(last.expenses.len(), 5);
        assert_eq!(last.page_count, 3);
        assert!(past_end.expenses.is_empty());
        assert_eq!(past_end.page_count, 3);
        assert_eq!(past_end.page, 4);
    }

    #[test]
    fn last_page_holds_oldest_expenses() {
        let store = store_with_daily_expenses(25);

        let last = get_expense_page(&store, PageRequest::new(3, 10).unwrap()).unwrap();

        let dates: Vec<Date> = last.expenses.iter().map(|expense| expense.date).collect();
        assert_eq!(
            dates,
            [
                date!(2024 - 01 - 05),
                date!(2024 - 01 - 04),
                date!(2024 - 01 - 03),
                date!(2024 - 01 - 02),
                date!(2024 - 01 - 01),
            ]
        );
    }

    #[test]
    fn empty_store_has_zero_pages() {
        let store = InMemoryExpenseStore::new();

        let page = get_expense_page(&store, PageRequest::new(1, 10).unwrap()).unwrap();

        assert!(page.expenses.is_empty());
        assert_eq!(page.page_count, 0);
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn store_errors_are_returned() {
        let got = get_expense_page(&FailingExpenseStore, PageRequest::new(1, 10).unwrap());

        assert_eq!(got, Err(Error::DatabaseLockError));
    }
}
