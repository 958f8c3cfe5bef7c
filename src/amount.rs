//! A decimal amount of money.
//!
//! Amounts are stored as base-10 decimals so that summing many small amounts
//! never drifts the way binary floating point does.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A signed amount of money, e.g. `12.30` or `-4.5`.
///
/// Serializes as a decimal string and is stored in SQLite as text.
///
/// Parsed and stored amounts are at most [Amount::MAX] in size, so summing
/// them cannot overflow the underlying decimal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// An amount of zero.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// The largest amount, in either direction, that can be recorded: one
    /// trillion dollars.
    pub const MAX: Amount = Amount(Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0));

    /// Wrap a decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// The exact decimal value.
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Whether the amount is no larger than [Amount::MAX] in either direction.
    pub fn is_within_limit(self) -> bool {
        self.0.abs() <= Self::MAX.0
    }

    /// Whether the amount is below zero.
    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// The amount rounded to the nearest cent, with halves rounded away from zero.
    pub fn round_to_cents(self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// A floating point approximation for chart rendering.
    ///
    /// Do not use the result for arithmetic.
    pub fn to_f64_lossy(self) -> f64 {
        self.round_to_cents().to_f64().unwrap_or_default()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl FromStr for Amount {
    type Err = Error;

    /// Parse an amount such as `"12.30"`, `"-4"` or `" 0.5 "`.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the text is not a finite decimal number
    /// or is larger than [Amount::MAX] in either direction.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Err(Error::InvalidAmount(text.to_owned()));
        }

        match Decimal::from_str(trimmed).map(Amount) {
            Ok(amount) if amount.is_within_limit() => Ok(amount),
            _ => Err(Error::InvalidAmount(text.to_owned())),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Saturates at the limits of [Decimal] instead of panicking. Sums of amounts
/// within [Amount::MAX] stay exact until there are billions of them.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.to_string()))
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let amount = match value {
            ValueRef::Text(bytes) => {
                let text =
                    std::str::from_utf8(bytes).map_err(|error| FromSqlError::Other(Box::new(error)))?;

                Decimal::from_str(text)
                    .map(Amount)
                    .map_err(|error| FromSqlError::Other(Box::new(error)))
            }
            ValueRef::Integer(integer) => Ok(Amount(Decimal::from(integer))),
            _ => Err(FromSqlError::InvalidType),
        }?;

        if amount.is_within_limit() {
            Ok(amount)
        } else {
            Err(FromSqlError::Other(Box::new(Error::InvalidAmount(
                amount.to_string(),
            ))))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rusqlite::Connection;
    use rust_decimal_macros::dec;

    use crate::{Error, amount::Amount};

    #[test]
    fn parses_decimal_text() {
        assert_eq!(Amount::from_str("12.30"), Ok(Amount::new(dec!(12.30))));
        assert_eq!(Amount::from_str(" -4 "), Ok(Amount::new(dec!(-4))));
        assert_eq!(Amount::from_str("0"), Ok(Amount::ZERO));
    }

    #[test]
    fn rejects_non_numbers() {
        for text in ["", "   ", "abc", "NaN", "inf", "1.2.3", "12,30"] {
            assert_eq!(
                Amount::from_str(text),
                Err(Error::InvalidAmount(text.to_owned())),
                "want {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_amounts_beyond_one_trillion() {
        for text in [
            "79228162514264337593543950335",
            "-79228162514264337593543950335",
            "1000000000000.01",
        ] {
            assert_eq!(
                Amount::from_str(text),
                Err(Error::InvalidAmount(text.to_owned())),
                "want {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn accepts_one_trillion() {
        assert_eq!(
            Amount::from_str("1000000000000"),
            Ok(Amount::new(dec!(1000000000000)))
        );
        assert_eq!(
            Amount::from_str("-1000000000000.00"),
            Ok(Amount::new(dec!(-1000000000000.00)))
        );
        assert_eq!(Amount::MAX, Amount::new(dec!(1000000000000)));
    }

    #[test]
    fn sum_does_not_drift() {
        let amounts = vec![Amount::new(dec!(0.1)); 1000];

        let total: Amount = amounts.iter().sum();

        assert_eq!(total, Amount::new(dec!(100)));
    }

    #[test]
    fn addition_saturates_instead_of_overflowing() {
        let huge = Amount::new(rust_decimal::Decimal::MAX);

        assert_eq!(huge + huge, huge);
        assert_eq!([huge, huge].iter().sum::<Amount>(), huge);
        assert_eq!(Amount::MAX + Amount::MAX, Amount::new(dec!(2000000000000)));
    }

    #[test]
    fn rounds_halves_away_from_zero() {
        assert_eq!(Amount::new(dec!(0.125)).round_to_cents(), dec!(0.13));
        assert_eq!(Amount::new(dec!(-0.125)).round_to_cents(), dec!(-0.13));
        assert_eq!(Amount::new(dec!(1.234)).round_to_cents(), dec!(1.23));
    }

    #[test]
    fn negative_zero_is_not_negative() {
        assert!(!Amount::new(dec!(-0.00)).is_negative());
        assert!(Amount::new(dec!(-0.01)).is_negative());
    }

    #[test]
    fn round_trips_through_sqlite_as_text() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute("CREATE TABLE amounts (value TEXT NOT NULL)", ())
            .unwrap();
        let want = Amount::new(dec!(1234567890.123456789));

        connection
            .execute("INSERT INTO amounts (value) VALUES (?1)", (want,))
            .unwrap();
        let stored_type: String = connection
            .query_row("SELECT typeof(value) FROM amounts", [], |row| row.get(0))
            .unwrap();
        let got: Amount = connection
            .query_row("SELECT value FROM amounts", [], |row| row.get(0))
            .unwrap();

        assert_eq!(stored_type, "text");
        assert_eq!(got, want);
    }

    #[test]
    fn rejects_stored_amounts_beyond_one_trillion() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute("CREATE TABLE amounts (value TEXT NOT NULL)", ())
            .unwrap();
        connection
            .execute(
                "INSERT INTO amounts (value) VALUES ('79228162514264337593543950335')",
                (),
            )
            .unwrap();

        let got = connection.query_row("SELECT value FROM amounts", [], |row| {
            row.get::<_, Amount>(0)
        });

        assert!(got.is_err());
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&Amount::new(dec!(-12.50))).unwrap();

        assert_eq!(json, "\"-12.50\"");
    }
}
