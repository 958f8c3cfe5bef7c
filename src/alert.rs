//! Alert messages for reporting the outcome of form submissions and deletions.
//!
//! Alerts are HTML fragments that HTMX swaps into the `#alert-container`
//! element rendered by [base](crate::html::base).

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A success or error message shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message without details.
    SuccessSimple {
        /// The headline.
        message: String,
    },
    /// An error message with details on how to fix the problem.
    Error {
        /// The headline.
        message: String,
        /// A longer explanation shown under the headline.
        details: String,
    },
}

const SUCCESS_STYLE: &str = "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
    dark:bg-gray-800 dark:text-green-400 border border-green-300 dark:border-green-800";

const ERROR_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
    dark:bg-gray-800 dark:text-red-400 border border-red-300 dark:border-red-800";

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::SuccessSimple { message } => (SUCCESS_STYLE, message, String::new()),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        html!(
            div
                role="alert"
                class=(style)
                hx-on:click="this.remove(); document.getElementById('alert-container').classList.add('hidden');"
            {
                p class="font-medium" { (message) }

                @if !details.is_empty() {
                    p class="mt-1" { (details) }
                }
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
