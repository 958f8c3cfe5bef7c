//! Parses the optional query string parameters for the listing and the month summary.
//!
//! Parameters arrive as text so that malformed values can be reported as
//! validation errors instead of being rejected by the extractor. An empty
//! value, e.g. `?page=`, is treated the same as a missing one.

use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    month::{MAX_YEAR, MIN_YEAR, MonthYear},
    pagination::{PageRequest, PaginationConfig},
    summary::resolve_month,
};

/// The query parameters for paging through expenses.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct PageQuery {
    /// The page number, starting from 1.
    pub page: Option<String>,
    /// The number of expenses per page.
    pub limit: Option<String>,
}

impl PageQuery {
    /// Parse the query, falling back to `config` for missing values.
    ///
    /// # Errors
    /// Returns [Error::InvalidPage] or [Error::InvalidLimit] if a value is
    /// present but is not a positive whole number.
    pub fn to_page_request(&self, config: &PaginationConfig) -> Result<PageRequest, Error> {
        let page = match present(&self.page) {
            Some(raw) => parse_positive(raw).ok_or_else(|| Error::InvalidPage(raw.to_owned()))?,
            None => config.default_page,
        };

        let limit = match present(&self.limit) {
            Some(raw) => parse_positive(raw).ok_or_else(|| Error::InvalidLimit(raw.to_owned()))?,
            None => config.default_page_size,
        };

        PageRequest::new(page, limit)
    }
}

/// The query parameters for choosing the month to summarise.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct MonthQuery {
    /// The month of the year, 1 to 12.
    pub month: Option<String>,
    /// The calendar year.
    pub year: Option<String>,
}

impl MonthQuery {
    /// Parse the query, defaulting each missing value to the month or year of
    /// the date returned by `today`.
    ///
    /// `today` is only called once both values have been validated, and not at
    /// all if both are given.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] or [Error::InvalidYear] if a value is
    /// present but is not a whole number in range, or the error from `today`.
    pub fn resolve(
        &self,
        today: impl FnOnce() -> Result<Date, Error>,
    ) -> Result<MonthYear, Error> {
        let month = present(&self.month).map(parse_month).transpose()?;
        let year = present(&self.year).map(parse_year).transpose()?;

        match (month, year) {
            (Some(month), Some(year)) => MonthYear::new(month, year),
            (month, year) => resolve_month(month, year, today()?),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_positive(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().filter(|&value| value > 0)
}

fn parse_month(raw: &str) -> Result<u8, Error> {
    raw.parse::<u8>()
        .ok()
        .filter(|month| (1..=12).contains(month))
        .ok_or_else(|| Error::InvalidMonth(raw.to_owned()))
}

fn parse_year(raw: &str) -> Result<i32, Error> {
    raw.parse::<i32>()
        .ok()
        .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
        .ok_or_else(|| Error::InvalidYear(raw.to_owned()))
}
