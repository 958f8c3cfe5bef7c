//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    alert::Alert, html::error_view, internal_server_error::InternalServerError,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The month was not an integer from 1 to 12.
    #[error("invalid month \"{0}\": expected a whole number from 1 to 12")]
    InvalidMonth(String),

    /// The year was not an integer in the supported range.
    #[error("invalid year \"{0}\": expected a whole number from 1 to 9998")]
    InvalidYear(String),

    /// The page number was not a positive integer.
    #[error("invalid page \"{0}\": expected a whole number greater than zero")]
    InvalidPage(String),

    /// The page size was not a positive integer.
    #[error("invalid limit \"{0}\": expected a whole number greater than zero")]
    InvalidLimit(String),

    /// The amount of an expense could not be parsed as a decimal number, or
    /// was larger than [Amount::MAX](crate::Amount::MAX) in either direction.
    #[error(
        "invalid amount \"{0}\": expected a number such as 12.30 between -1,000,000,000,000 and 1,000,000,000,000"
    )]
    InvalidAmount(String),

    /// The date of an expense could not be parsed.
    #[error("invalid date \"{0}\": expected a date in the format YYYY-MM-DD")]
    InvalidDate(String),

    /// An expense name was empty or only whitespace.
    #[error("expense name cannot be empty")]
    EmptyExpenseName,

    /// An expense category was empty or only whitespace.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update an expense that does not exist.
    #[error("tried to update an expense that is not in the database")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist.
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the lock guarding the expense store.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// Whether the error was caused by malformed input from the client.
    ///
    /// Validation errors are raised before the expense store is touched.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidMonth(_)
                | Error::InvalidYear(_)
                | Error::InvalidPage(_)
                | Error::InvalidLimit(_)
                | Error::InvalidAmount(_)
                | Error::InvalidDate(_)
                | Error::EmptyExpenseName
                | Error::EmptyCategory
        )
    }

    /// The HTTP status code that best describes the error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            error if error.is_validation_error() => StatusCode::BAD_REQUEST,
            Error::NotFound | Error::UpdateMissingExpense | Error::DeleteMissingExpense => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let status_code = self.status_code();
        let alert = match self {
            error if error.is_validation_error() => Alert::Error {
                message: "Invalid expense".to_owned(),
                details: capitalize(&error.to_string()),
            },
            Error::InvalidTimezoneError(timezone) => Alert::Error {
                message: "Invalid Timezone Settings".to_owned(),
                details: format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            },
            Error::NotFound | Error::UpdateMissingExpense => Alert::Error {
                message: "Could not update expense".to_owned(),
                details: "The expense could not be found.".to_owned(),
            },
            Error::DeleteMissingExpense => Alert::Error {
                message: "Could not delete expense".to_owned(),
                details: "The expense could not be found. \
                    Try refreshing the page to see if the expense has already been deleted."
                    .to_owned(),
            },
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details: "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                }
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            error if error.is_validation_error() => (
                StatusCode::BAD_REQUEST,
                Html(
                    error_view(
                        "Bad Request",
                        "400",
                        &capitalize(&error.to_string()),
                        "Check the values in the address bar and try again.",
                    )
                    .into_string(),
                ),
            )
                .into_response(),
            Error::NotFound | Error::UpdateMissingExpense | Error::DeleteMissingExpense => {
                NotFoundError.into_response()
            }
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
