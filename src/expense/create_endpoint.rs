//! Defines the endpoint for creating a new expense.

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{AppState, endpoints, expense::ExpenseForm, store::SharedExpenseStore};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The store for managing expenses.
    pub store: SharedExpenseStore,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for creating a new expense, redirects to the expense listing on success.
///
/// Invalid form values are rejected with an alert before the store is touched.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let expense = match form.to_new_expense() {
        Ok(expense) => expense,
        Err(error) => {
            tracing::debug!("rejected expense form {form:?}: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = state.store.create(expense) {
        tracing::error!("could not create expense: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod create_expense_endpoint_tests {
    use std::sync::Arc;

    use axum::{Form, extract::State, http::StatusCode};
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        amount::Amount,
        endpoints,
        expense::{ExpenseForm, create_endpoint::CreateExpenseState, create_expense_endpoint},
        store::{ExpenseStore, InMemoryExpenseStore},
        test_utils::{FailingExpenseStore, assert_hx_redirect, parse_html_fragment},
    };

    fn form(amount: &str) -> ExpenseForm {
        ExpenseForm {
            name: "Coffee".to_owned(),
            amount: amount.to_owned(),
            date: "2024-02-29".to_owned(),
            category: "Eating out".to_owned(),
        }
    }

    #[tokio::test]
    async fn creates_expense_and_redirects() {
        let store = Arc::new(InMemoryExpenseStore::new());
        let state = CreateExpenseState {
            store: store.clone(),
        };

        let response = create_expense_endpoint(State(state), Form(form("4.50"))).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::EXPENSES_VIEW);
        let expense = store.get(1).unwrap();
        assert_eq!(expense.name, "Coffee");
        assert_eq!(expense.amount, Amount::new(dec!(4.50)));
        assert_eq!(expense.date, date!(2024 - 02 - 29));
        assert_eq!(expense.category, "Eating out");
    }

    #[tokio::test]
    async fn invalid_amount_is_rejected_with_alert() {
        let store = Arc::new(InMemoryExpenseStore::new());
        let state = CreateExpenseState {
            store: store.clone(),
        };

        let response = create_expense_endpoint(State(state), Form(form("lots"))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Invalid expense"), "got {text:?}");
        assert_eq!(store.count(), Ok(0));
    }

    #[tokio::test]
    async fn validation_happens_before_store_access() {
        let state = CreateExpenseState {
            store: Arc::new(FailingExpenseStore),
        };

        let response = create_expense_endpoint(State(state), Form(form(""))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_error_is_server_error() {
        let state = CreateExpenseState {
            store: Arc::new(FailingExpenseStore),
        };

        let response = create_expense_endpoint(State(state), Form(form("1.00"))).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
