//! The total spent in each month, as a table and a chart.

mod core;
mod monthly_totals_page;

pub use core::{MonthlyTotals, aggregate_by_month, get_monthly_totals};
pub use monthly_totals_page::get_monthly_totals_page;
