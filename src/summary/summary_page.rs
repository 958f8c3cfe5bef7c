//! The page showing the expenses and total for a single month.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Serialize;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    month::{MAX_YEAR, MIN_YEAR, MonthYear},
    navigation::NavBar,
    params::MonthQuery,
    store::SharedExpenseStore,
    summary::{MonthlySummary, get_monthly_summary},
    timezone::current_local_date,
};

/// The state needed for the month summary page.
#[derive(Debug, Clone)]
pub struct SummaryPageState {
    /// The store to read expenses from.
    pub store: SharedExpenseStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for SummaryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the expenses and total for the month in the query, defaulting to the current month.
pub async fn get_summary_page(
    State(state): State<SummaryPageState>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let month = query.resolve(|| current_local_date(&state.local_timezone))?;

    let summary = get_monthly_summary(state.store.as_ref(), month).inspect_err(|error| {
        tracing::error!("Failed to retrieve the summary for {month}: {error}")
    })?;

    Ok(summary_view(&summary).into_response())
}

#[derive(Serialize)]
struct MonthLinkQuery {
    month: u8,
    year: i32,
}

/// The link to the summary for `month`, or `None` if the month is out of range.
fn summary_url(month: MonthYear) -> Option<String> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&month.year()) {
        return None;
    }

    let query = MonthLinkQuery {
        month: month.month(),
        year: month.year(),
    };

    serde_urlencoded::to_string(query)
        .inspect_err(|error| tracing::error!("Could not build link to {month}: {error}"))
        .ok()
        .map(|query| format!("{}?{query}", endpoints::SUMMARY_VIEW))
}

fn month_picker_view(month: MonthYear) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::SUMMARY_VIEW)
            class="flex flex-wrap items-end gap-4"
        {
            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                select name="month" id="month" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for number in 1..=12u8 {
                        @let name = MonthYear::new(number, month.year())
                            .map(MonthYear::month_name)
                            .unwrap_or_else(|_| number.to_string());

                        option value=(number) selected[number == month.month()] { (name) }
                    }
                }
            }

            div
            {
                label for="year" class=(FORM_LABEL_STYLE) { "Year" }

                input
                    name="year"
                    id="year"
                    type="number"
                    min=(MIN_YEAR)
                    max=(MAX_YEAR)
                    step="1"
                    value=(month.year())
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Show" }
        }
    }
}

fn month_navigation_view(summary: &MonthlySummary) -> Markup {
    html! {
        nav class="flex justify-between items-center w-full" aria-label="Months"
        {
            @if let Some(href) = summary_url(summary.previous) {
                a href=(href) rel="prev" class=(BUTTON_SECONDARY_STYLE)
                {
                    (summary.previous.month_name()) " " (summary.previous.year())
                }
            } @else {
                span {}
            }

            h2 class="text-lg font-semibold" aria-current="page"
            {
                (summary.month.month_name()) " " (summary.month.year())
            }

            @if let Some(href) = summary_url(summary.next) {
                a href=(href) rel="next" class=(BUTTON_SECONDARY_STYLE)
                {
                    (summary.next.month_name()) " " (summary.next.year())
                }
            } @else {
                span {}
            }
        }
    }
}

fn expenses_table_view(summary: &MonthlySummary) -> Markup {
    html! {
        table id="summary-expenses" class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                }
            }

            tbody
            {
                @for expense in &summary.expenses {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td class=(TABLE_CELL_STYLE) { time datetime=(expense.date) { (expense.date) } }
                        td class=(TABLE_CELL_STYLE) { (expense.name) }
                        td class=(TABLE_CELL_STYLE)
                        {
                            span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
                        }
                        td class={ (TABLE_CELL_STYLE) " text-right" } { (format_currency(expense.amount)) }
                    }
                }

                @if summary.expenses.is_empty() {
                    tr
                    {
                        td
                            colspan="4"
                            class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                        {
                            "No expenses in this month. "
                            a href=(endpoints::NEW_EXPENSE_VIEW) class=(LINK_STYLE) { "Add an expense" }
                        }
                    }
                }
            }

            tfoot
            {
                tr class="font-semibold text-gray-900 dark:text-white"
                {
                    th scope="row" colspan="3" class=(TABLE_CELL_STYLE) { "Total" }
                    td id="summary-total" class={ (TABLE_CELL_STYLE) " text-right" }
                    {
                        (format_currency(summary.total))
                    }
                }
            }
        }
    }
}

fn category_totals_view(summary: &MonthlySummary) -> Markup {
    html! {
        @if !summary.category_totals.is_empty() {
            section class="space-y-2"
            {
                h2 class="text-lg font-semibold" { "By Category" }

                table id="category-totals" class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Total" }
                        }
                    }

                    tbody
                    {
                        @for category_total in &summary.category_totals {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE)
                                {
                                    span class=(CATEGORY_BADGE_STYLE) { (category_total.category) }
                                }
                                td class={ (TABLE_CELL_STYLE) " text-right" }
                                {
                                    (format_currency(category_total.total))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn summary_view(summary: &MonthlySummary) -> Markup {
    let nav_bar = NavBar::new(endpoints::SUMMARY_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-6 w-full lg:max-w-5xl"
            {
                h1 class="text-xl font-bold" { "Summary" }

                (month_picker_view(summary.month))
                (month_navigation_view(summary))

                div class="dark:bg-gray-800 overflow-x-auto"
                {
                    (expenses_table_view(summary))
                }

                (category_totals_view(summary))
            }
        }
    };

    base("Summary", &[], &content)
}
