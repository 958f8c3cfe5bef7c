//! A web app for recording household expenses and seeing where the money went.
//!
//! This library provides a REST API that directly serves HTML pages, plus a
//! small JSON API, on top of three read operations:
//!
//! - [aggregate_by_month] and [get_monthly_totals] total the expenses in each
//!   calendar month, keyed `"month/year"` in chronological order.
//! - [get_monthly_summary] lists the expenses in one month with their total.
//! - [get_expense_page] pages through every expense, newest first.
//!
//! Expenses are kept behind the [ExpenseStore] trait, backed by SQLite in the
//! server and by [InMemoryExpenseStore] in tests.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod amount;
mod api;
mod app_state;
mod db;
mod endpoints;
mod error;
mod expense;
mod html;
mod internal_server_error;
mod logging;
mod month;
mod monthly_totals;
mod navigation;
mod not_found;
mod pagination;
mod params;
mod routing;
mod store;
mod summary;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use amount::Amount;
pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use expense::{Expense, ExpenseId, NewExpense};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::{DateWindow, MonthYear};
pub use monthly_totals::{MonthlyTotals, aggregate_by_month, get_monthly_totals};
pub use pagination::{ExpensePage, PageRequest, PaginationConfig, get_expense_page};
pub use routing::build_router;
pub use store::{ExpenseStore, InMemoryExpenseStore, SQLiteExpenseStore, SharedExpenseStore};
pub use summary::{CategoryTotal, MonthlySummary, get_monthly_summary};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
