//! Defines the endpoint for deleting an expense.

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{AppState, alert::Alert, expense::ExpenseId, store::SharedExpenseStore};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The store for managing expenses.
    pub store: SharedExpenseStore,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for deleting an expense, responds with an alert.
///
/// The status code has to be 200 OK on success or HTMX will not remove the table row.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    match state.store.delete(expense_id) {
        Ok(()) => Alert::SuccessSimple {
            message: "Expense deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("Could not delete expense {expense_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_expense_endpoint_tests {
    use std::sync::Arc;

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        expense::{delete_endpoint::DeleteExpenseState, delete_expense_endpoint},
        store::ExpenseStore,
        test_utils::{FailingExpenseStore, parse_html_fragment, store_with_expenses},
    };

    #[tokio::test]
    async fn deletes_expense() {
        let store = Arc::new(store_with_expenses(&[(
            "Lunch",
            dec!(15),
            date!(2024 - 05 - 05),
            "Eating out",
        )]));
        let state = DeleteExpenseState {
            store: store.clone(),
        };

        let response = delete_expense_endpoint(State(state), Path(1)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Expense deleted successfully"), "got {text:?}");
        assert_eq!(store.get(1), Err(Error::NotFound));
    }

    #[tokio::test]
    async fn missing_expense_is_not_found() {
        let state = DeleteExpenseState {
            store: Arc::new(store_with_expenses(&[])),
        };

        let response = delete_expense_endpoint(State(state), Path(3)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn store_error_is_server_error() {
        let state = DeleteExpenseState {
            store: Arc::new(FailingExpenseStore),
        };

        let response = delete_expense_endpoint(State(state), Path(1)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
