//! Application router configuration for the HTML pages and the JSON API.

use axum::{
    Router,
    response::Redirect,
    routing::{get, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    api::{get_expense_json, get_expenses_json, get_monthly_totals_json, get_summary_json},
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, edit_expense_endpoint,
        get_edit_expense_page, get_expenses_page, get_new_expense_page,
    },
    internal_server_error::get_internal_server_error_page,
    monthly_totals::get_monthly_totals_page,
    not_found::get_404_not_found,
    summary::get_summary_page,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::NEW_EXPENSE_VIEW, get(get_new_expense_page))
        .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_page))
        .route(endpoints::SUMMARY_VIEW, get(get_summary_page))
        .route(endpoints::MONTHLY_TOTALS_VIEW, get(get_monthly_totals_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // The POST/PUT/DELETE routes are submitted by HTMX and respond with HX-Redirect or an alert.
    let api_routes = Router::new()
        .route(
            endpoints::EXPENSES_API,
            get(get_expenses_json).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            put(edit_expense_endpoint)
                .get(get_expense_json)
                .delete(delete_expense_endpoint),
        )
        .route(endpoints::SUMMARY_API, get(get_summary_json))
        .route(endpoints::MONTHLY_TOTALS_API, get(get_monthly_totals_json));

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the expense listing.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::EXPENSES_VIEW)
}


#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    use crate::{
        AppState, endpoints,
        pagination::PaginationConfig,
        routing::build_router,
        store::{ExpenseStore, InMemoryExpenseStore},
    };

    fn new_server() -> (TestServer, Arc<InMemoryExpenseStore>) {
        let store = Arc::new(InMemoryExpenseStore::new());
        let state = AppState::new(store.clone(), "Etc/UTC", PaginationConfig::default());
        let server = TestServer::new(build_router(state));

        (server, store)
    }

    fn expense_form<'a>(name: &'a str, amount: &'a str, date: &'a str) -> [(&'a str, &'a str); 4] {
        [
            ("name", name),
            ("amount", amount),
            ("date", date),
            ("category", "Groceries"),
        ]
    }

    #[tokio::test]
    async fn serves_every_page() {
        let (server, _) = new_server();

        for endpoint in [
            endpoints::EXPENSES_VIEW,
            endpoints::NEW_EXPENSE_VIEW,
            endpoints::SUMMARY_VIEW,
            endpoints::MONTHLY_TOTALS_VIEW,
        ] {
            let response = server.get(endpoint).await;
            assert_eq!(response.status_code(), StatusCode::OK, "GET {endpoint}");
        }

        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (server, _) = new_server();

        server
            .get("/definitely/not/a/page")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn create_edit_and_delete_expense() {
        let (server, store) = new_server();

        server
            .post(endpoints::EXPENSES_API)
            .form(&expense_form("Milk", "3.50", "2024-02-29"))
            .await
            .assert_status_see_other();
        assert_eq!(store.count(), Ok(1));

        let expense_url = endpoints::format_endpoint(endpoints::EXPENSE, 1);
        let expense: Value = server.get(&expense_url).await.json();
        assert_eq!(expense["name"], "Milk");
        assert_eq!(expense["amount"], "3.50");

        server
            .get(&endpoints::format_endpoint(endpoints::EDIT_EXPENSE_VIEW, 1))
            .await
            .assert_status_ok();

        server
            .put(&expense_url)
            .form(&expense_form("Oat milk", "4.20", "2024-03-01"))
            .await
            .assert_status_see_other();
        assert_eq!(store.get(1).map(|expense| expense.name), Ok("Oat milk".to_owned()));

        server.delete(&expense_url).await.assert_status_ok();
        server.get(&expense_url).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn invalid_form_is_bad_request() {
        let (server, store) = new_server();

        server
            .post(endpoints::EXPENSES_API)
            .form(&expense_form("Milk", "three", "2024-02-29"))
            .await
            .assert_status_bad_request();
        assert_eq!(store.count(), Ok(0));
    }

    #[tokio::test]
    async fn json_endpoints_reflect_created_expenses() {
        let (server, _) = new_server();

        for (name, amount, date) in [
            ("Rent", "1500", "2023-12-01"),
            ("Milk", "3.50", "2024-02-01"),
            ("Cake", "12.25", "2024-02-29"),
            ("Bus", "2.20", "2024-03-01"),
        ] {
            server
                .post(endpoints::EXPENSES_API)
                .form(&expense_form(name, amount, date))
                .await
                .assert_status_see_other();
        }

        let totals = server.get(endpoints::MONTHLY_TOTALS_API).await.text();
        assert_eq!(totals, r#"{"12/2023":"1500","2/2024":"15.75","3/2024":"2.20"}"#);

        let summary: Value = server
            .get(endpoints::SUMMARY_API)
            .add_query_param("month", 12)
            .add_query_param("year", 2023)
            .await
            .json();
        assert_eq!(summary["total"], "1500");
        assert_eq!(summary["window"]["end"], "2024-01-01");

        let page: Value = server
            .get(endpoints::EXPENSES_API)
            .add_query_param("limit", 3)
            .await
            .json();
        assert_eq!(page["page_count"], 2);
        assert_eq!(page["expenses"][0]["name"], "Bus");
    }

    #[tokio::test]
    async fn invalid_query_is_bad_request() {
        let (server, _) = new_server();

        server
            .get(endpoints::SUMMARY_API)
            .add_query_param("month", 13)
            .await
            .assert_status_bad_request();

        server
            .get(endpoints::EXPENSES_VIEW)
            .add_query_param("page", "abc")
            .await
            .assert_status_bad_request();
    }
}
