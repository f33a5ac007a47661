//! Date helpers for harvest bucketing and display.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for year-month parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum YearMonthError {
    #[error("Invalid year-month format: {0}")]
    InvalidFormat(String),
    #[error("Month out of range: {0}")]
    InvalidMonth(u32),
}

/// A calendar month used as a chart bucket key.
///
/// Field order matters: the derived `Ord` compares year first, then month,
/// numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, YearMonthError> {
        if !(1..=12).contains(&month) {
            return Err(YearMonthError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Bucket containing the given instant (UTC calendar).
    pub fn of(time: &DateTime<Utc>) -> Self {
        Self {
            year: time.year(),
            month: time.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = YearMonthError;

    /// Accepts `YYYY-M` and `YYYY-MM`; anything after the month is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || YearMonthError::InvalidFormat(s.to_string());
        let mut parts = s.trim().splitn(3, '-');
        let year = parts
            .next()
            .and_then(|y| y.parse::<i32>().ok())
            .ok_or_else(invalid)?;
        let month = parts
            .next()
            .and_then(|m| m.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = YearMonthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

/// Selectable harvest years from `first_year` through `current_year`.
pub fn year_range(first_year: i32, current_year: i32) -> Vec<i32> {
    (first_year..=current_year).collect()
}

/// Long US-style date, e.g. `June 1, 2024`.
pub fn format_date(time: &DateTime<Utc>) -> String {
    time.format("%B %-d, %Y").to_string()
}

/// Short Norwegian date, e.g. `1.6.2024`.
pub fn format_date_nb(time: &DateTime<Utc>) -> String {
    time.format("%-d.%-m.%Y").to_string()
}
