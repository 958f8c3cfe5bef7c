//! Calendar month buckets and the date windows that they cover.

use std::fmt;

use serde::{Serialize, Serializer};
use time::{Date, Month};

use crate::Error;

/// The earliest year accepted for a month bucket.
pub const MIN_YEAR: i32 = 1;
/// The latest year accepted for a month bucket.
///
/// The window for December must end on January 1 of the following year, which
/// must still be a representable date.
pub const MAX_YEAR: i32 = 9998;

/// A calendar month in a specific year, e.g. February 2024.
///
/// Orders by year, then month. Displays as `"month/year"` without padding,
/// e.g. `"2/2024"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear {
    // Field order matters for the derived ordering.
    year: i32,
    month: u8,
}

impl MonthYear {
    /// Create a month bucket.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `month` is not in 1..=12 and
    /// [Error::InvalidYear] if `year` is outside [MIN_YEAR]..=[MAX_YEAR].
    pub fn new(month: u8, year: i32) -> Result<Self, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonth(month.to_string()));
        }

        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::InvalidYear(year.to_string()));
        }

        Ok(Self { year, month })
    }

    /// The month that `date` falls in.
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
        }
    }

    /// The month of the year, from 1 to 12.
    pub fn month(self) -> u8 {
        self.month
    }

    /// The calendar year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// The month after this one, rolling December over into January.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The month before this one, rolling January back into December.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The first day of the month.
    ///
    /// # Errors
    /// Returns [Error::InvalidYear] if the date cannot be represented.
    pub fn first_day(self) -> Result<Date, Error> {
        let month =
            Month::try_from(self.month).map_err(|_| Error::InvalidMonth(self.month.to_string()))?;

        Date::from_calendar_date(self.year, month, 1)
            .map_err(|_| Error::InvalidYear(self.year.to_string()))
    }

    /// The half-open window `[first day of month, first day of next month)`.
    ///
    /// # Errors
    /// Returns [Error::InvalidYear] if either bound cannot be represented.
    pub fn window(self) -> Result<DateWindow, Error> {
        Ok(DateWindow {
            start: self.first_day()?,
            end: self.next().first_day()?,
        })
    }

    /// The English name of the month, e.g. "February".
    pub fn month_name(self) -> String {
        Month::try_from(self.month)
            .map(|month| month.to_string())
            .unwrap_or_else(|_| self.month.to_string())
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

impl Serialize for MonthYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A half-open range of dates, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    /// The first date inside the window.
    pub start: Date,
    /// The first date after the window.
    pub end: Date,
}

impl DateWindow {
    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date < self.end
    }
}
