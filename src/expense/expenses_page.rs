//! The paged listing of every expense, newest first.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Serialize;

use crate::{
    AppState, Error, endpoints,
    expense::Expense,
    html::{
        CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, edit_delete_action_links, format_currency,
    },
    navigation::NavBar,
    pagination::{
        ExpensePage, PaginationConfig, PaginationIndicator, create_pagination_indicators,
        get_expense_page,
    },
    params::PageQuery,
    store::SharedExpenseStore,
};

/// The state needed for the expense listing.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The store to read expenses from.
    pub store: SharedExpenseStore,
    /// The config that controls how to display pages of expenses.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Render one page of expenses.
///
/// A bad `page` or `limit` renders a 400 page without touching the store.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    Query(query): Query<PageQuery>,
) -> Result<Response, Error> {
    let request = query.to_page_request(&state.pagination_config)?;

    let page = get_expense_page(state.store.as_ref(), request)
        .inspect_err(|error| tracing::error!("Failed to retrieve page of expenses: {error}"))?;

    Ok(expenses_view(&page, state.pagination_config.max_pages).into_response())
}

#[derive(Serialize)]
struct PageLinkQuery {
    page: u64,
    limit: u64,
}

fn page_url(page: u64, limit: u64) -> String {
    match serde_urlencoded::to_string(PageLinkQuery { page, limit }) {
        Ok(query) => format!("{}?{query}", endpoints::EXPENSES_VIEW),
        Err(error) => {
            tracing::error!("Could not build link to page {page}: {error}");
            endpoints::EXPENSES_VIEW.to_owned()
        }
    }
}

fn expense_row_view(expense: &Expense) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id);
    let delete_url = endpoints::format_endpoint(endpoints::EXPENSE, expense.id);
    let confirm_message = format!(
        "Are you sure you want to delete the expense '{}'? This cannot be undone.",
        expense.name
    );

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { time datetime=(expense.date) { (expense.date) } }
            td class=(TABLE_CELL_STYLE) { (expense.name) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
            }
            td class={ (TABLE_CELL_STYLE) " text-right" } { (format_currency(expense.amount)) }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    (edit_delete_action_links(
                        &edit_url,
                        &delete_url,
                        &confirm_message,
                        "closest tr",
                        "delete",
                    ))
                }
            }
        }
    }
}

fn pagination_view(page: &ExpensePage, max_pages: u64) -> Markup {
    let indicators = create_pagination_indicators(page.page, page.page_count, max_pages);

    html! {
        nav class="pagination flex justify-center" aria-label="Pages"
        {
            ul class="pagination flex gap-2 items-center p-0 m-0"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::CurrPage(number) => {
                                span
                                    aria-current="page"
                                    class="block px-3 py-2 rounded-sm font-bold text-black dark:text-white"
                                { (number) }
                            }
                            PaginationIndicator::Page(number) => {
                                a
                                    href=(page_url(number, page.limit))
                                    class="block px-3 py-2 rounded-sm text-blue-600 hover:underline"
                                { (number) }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class="block px-3 py-2 text-gray-500" { "..." }
                            }
                            PaginationIndicator::BackButton(number) => {
                                a
                                    href=(page_url(number, page.limit))
                                    role="button"
                                    class="block px-3 py-2 rounded-sm text-blue-600 hover:underline"
                                { "Back" }
                            }
                            PaginationIndicator::NextButton(number) => {
                                a
                                    href=(page_url(number, page.limit))
                                    role="button"
                                    class="block px-3 py-2 rounded-sm text-blue-600 hover:underline"
                                { "Next" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn expenses_view(page: &ExpensePage, max_pages: u64) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();
    let is_past_last_page = page.expenses.is_empty() && page.total_count > 0;

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Expenses" }

                    a href=(endpoints::NEW_EXPENSE_VIEW) class=(LINK_STYLE) { "Add Expense" }
                }

                div class="dark:bg-gray-800 overflow-x-auto"
                {
                    table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for expense in &page.expenses {
                                (expense_row_view(expense))
                            }

                            @if page.expenses.is_empty() {
                                tr
                                {
                                    td
                                        colspan="5"
                                        class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                    {
                                        @if is_past_last_page {
                                            "There are no expenses on this page. "
                                            a href=(page_url(1, page.limit)) class=(LINK_STYLE)
                                            {
                                                "Go to the first page"
                                            }
                                        } @else {
                                            "No expenses recorded yet. "
                                            a href=(endpoints::NEW_EXPENSE_VIEW) class=(LINK_STYLE)
                                            {
                                                "Add your first expense"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                (pagination_view(page, max_pages))
            }
        }
    };

    base("Expenses", &[], &content)
}
