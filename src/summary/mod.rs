//! The expenses and total for a chosen month.

mod core;
mod summary_page;

pub use core::{CategoryTotal, MonthlySummary, get_monthly_summary, resolve_month};
pub use summary_page::get_summary_page;
