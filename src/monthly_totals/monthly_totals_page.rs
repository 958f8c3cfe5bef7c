//! The page showing the total spent in each month as a table and a bar chart.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{
    AppState, Error, endpoints,
    html::{
        HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency,
    },
    monthly_totals::{MonthlyTotals, get_monthly_totals},
    navigation::NavBar,
    store::SharedExpenseStore,
};

const CHART_ID: &str = "monthly-totals-chart";

/// The state needed for the monthly totals page.
#[derive(Debug, Clone)]
pub struct MonthlyTotalsPageState {
    /// The store to read expenses from.
    pub store: SharedExpenseStore,
}

impl FromRef<AppState> for MonthlyTotalsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Render the total spent in each month, oldest month first.
pub async fn get_monthly_totals_page(
    State(state): State<MonthlyTotalsPageState>,
) -> Result<Response, Error> {
    let totals = get_monthly_totals(state.store.as_ref())
        .inspect_err(|error| tracing::error!("Failed to calculate monthly totals: {error}"))?;

    Ok(monthly_totals_view(&totals).into_response())
}

fn monthly_totals_chart(totals: &MonthlyTotals) -> Chart {
    let (labels, values): (Vec<String>, Vec<f64>) = totals
        .iter()
        .map(|(month, total)| (month.to_string(), total.to_f64_lossy()))
        .unzip();

    Chart::new()
        .title(Title::new().text("Monthly Totals").subtext("Total spent each month"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name("Total").data(values))
}

fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

fn chart_script(options: &str) -> HeadElement {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{CHART_ID}");
            const chart = echarts.init(chartDom);
            chart.setOption({options});

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }};
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

fn monthly_totals_view(totals: &MonthlyTotals) -> Markup {
    let nav_bar = NavBar::new(endpoints::MONTHLY_TOTALS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                h1 class="text-xl font-bold" { "Monthly Totals" }

                @if totals.is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "No expenses recorded yet. "
                        a href=(endpoints::NEW_EXPENSE_VIEW) class=(LINK_STYLE)
                        {
                            "Add your first expense"
                        }
                    }
                } @else {
                    div id=(CHART_ID) class="min-h-[380px] rounded dark:bg-gray-100" {}

                    table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Month" }
                                th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Total" }
                            }
                        }

                        tbody
                        {
                            @for (month, total) in totals {
                                tr class=(TABLE_ROW_STYLE) data-month=(month)
                                {
                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        (month.month_name()) " " (month.year())
                                    }
                                    td class={ (TABLE_CELL_STYLE) " text-right" }
                                    {
                                        (format_currency(*total))
                                    }
                                }
                            }
                        }

                        tfoot
                        {
                            tr class="font-semibold text-gray-900 dark:text-white"
                            {
                                th scope="row" class=(TABLE_CELL_STYLE) { "Total" }
                                td class={ (TABLE_CELL_STYLE) " text-right" }
                                {
                                    (format_currency(totals.grand_total()))
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    let head_elements = if totals.is_empty() {
        Vec::new()
    } else {
        vec![
            HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
            chart_script(&monthly_totals_chart(totals).to_string()),
        ]
    };

    base("Monthly Totals", &head_elements, &content)
}

#[cfg(test)]
mod monthly_totals_page_tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use rust_decimal_macros::dec;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        monthly_totals::{get_monthly_totals_page, monthly_totals_page::MonthlyTotalsPageState},
        test_utils::{
            FailingExpenseStore, assert_status_ok, assert_valid_html, parse_html_document,
            store_with_expenses,
        },
    };

    #[tokio::test]
    async fn shows_months_in_order_with_totals() {
        let store = store_with_expenses(&[
            ("a", dec!(1), date!(2024 - 03 - 15), "Misc"),
            ("b", dec!(2.50), date!(2024 - 01 - 10), "Misc"),
            ("c", dec!(3), date!(2023 - 12 - 01), "Misc"),
            ("d", dec!(0.25), date!(2024 - 01 - 31), "Misc"),
        ]);
        let state = MonthlyTotalsPageState {
            store: Arc::new(store),
        };

        let response = get_monthly_totals_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let rows = Selector::parse("tbody tr").unwrap();
        let months: Vec<&str> = html
            .select(&rows)
            .filter_map(|row| row.value().attr("data-month"))
            .collect();
        assert_eq!(months, ["12/2023", "1/2024", "3/2024"]);

        let totals: Vec<String> = html
            .select(&rows)
            .map(|row| row.text().collect::<String>())
            .collect();
        assert!(totals[1].contains("$2.75"), "got {:?}", totals[1]);

        let footer = Selector::parse("tfoot").unwrap();
        let grand_total = html
            .select(&footer)
            .next()
            .expect("No table footer")
            .text()
            .collect::<String>();
        assert!(grand_total.contains("$6.75"), "got {grand_total:?}");

        let chart = Selector::parse("#monthly-totals-chart").unwrap();
        assert!(html.select(&chart).next().is_some(), "want chart container");
    }

    #[tokio::test]
    async fn empty_store_shows_empty_state() {
        let state = MonthlyTotalsPageState {
            store: Arc::new(store_with_expenses(&[])),
        };

        let response = get_monthly_totals_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No expenses recorded yet"), "got {text:?}");
    }

    #[tokio::test]
    async fn store_error_is_server_error() {
        let state = MonthlyTotalsPageState {
            store: Arc::new(FailingExpenseStore),
        };

        let response = get_monthly_totals_page(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
