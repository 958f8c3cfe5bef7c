//! Defines the route handler for the page for editing an expense.

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    expense::{
        Expense, ExpenseId,
        form::{ExpenseFormDefaults, expense_form_fields},
    },
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, dollar_input_styles, loading_spinner},
    navigation::NavBar,
    store::SharedExpenseStore,
};

/// The state needed for the edit expense page.
#[derive(Debug, Clone)]
pub struct EditExpensePageState {
    /// The store to load the expense from.
    pub store: SharedExpenseStore,
}

impl FromRef<AppState> for EditExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Renders the page for editing an expense, prefilled with its current values.
pub async fn get_edit_expense_page(
    State(state): State<EditExpensePageState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Response, Error> {
    let expense = state.store.get(expense_id).inspect_err(|error| {
        if *error != Error::NotFound {
            tracing::error!("Failed to retrieve expense {expense_id}: {error}");
        }
    })?;

    Ok(edit_expense_view(&expense).into_response())
}

fn edit_expense_view(expense: &Expense) -> Markup {
    let edit_url = format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id);
    let update_url = format_endpoint(endpoints::EXPENSE, expense.id);
    let nav_bar = NavBar::new(&edit_url).into_html();
    let fields = expense_form_fields(&ExpenseFormDefaults::from_expense(expense));

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit Expense" }

            form
                hx-put=(update_url)
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                hx-disabled-elt="#submit-button"
                class="w-full space-y-4 md:space-y-6"
            {
                (fields)

                button
                    type="submit"
                    id="submit-button"
                    tabindex="0"
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    span id="indicator" class="inline htmx-indicator" { (loading_spinner()) }
                    " Update Expense"
                }
            }
        }
    };

    base("Edit Expense", &[dollar_input_styles()], &content)
}
