//! Calendar month model.
//!
//! This module contains the [`MonthPeriod`] type used to select the records
//! of a month (first through last day, inclusive) and to group records by
//! month.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::DailyRecord;

/// A calendar month.
///
/// Serialized as `YYYY-MM`. Months order chronologically.
///
/// # Example
///
/// ```
/// use workday_engine::models::MonthPeriod;
/// use chrono::NaiveDate;
///
/// let month: MonthPeriod = "2024-02".parse().unwrap();
///
/// assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert!(month.contains_date(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()));
/// assert!(!month.contains_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthPeriod {
    first_day: NaiveDate,
}

impl MonthPeriod {
    /// Creates the month of the given year and month number (1-12).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMonth`] for a month number out of range
    /// or a year chrono cannot represent.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(|| EngineError::InvalidMonth {
                value: format!("{:04}-{:02}", year, month),
            })
    }

    /// Returns the month a date falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first_day: date - Days::new(u64::from(date.day0())),
        }
    }

    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Returns the month number (1-12).
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Returns the first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Returns the last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns the number of days in the month.
    pub fn days(&self) -> u32 {
        self.last_day().day()
    }

    /// Checks if a date falls within the month, first and last day included.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day()
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonth {
            value: s.to_string(),
        };

        // chrono tolerates signs and short fields, so pin the YYYY-MM shape
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let all_digits = year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !all_digits {
            return Err(invalid());
        }

        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map(Self::from_date)
            .map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthPeriod {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthPeriod> for String {
    fn from(month: MonthPeriod) -> Self {
        month.to_string()
    }
}

/// Returns the records dated within the month, in their original order.
pub fn records_in_month(records: &[DailyRecord], month: MonthPeriod) -> Vec<DailyRecord> {
    records
        .iter()
        .filter(|record| month.contains_date(record.date))
        .cloned()
        .collect()
}

/// Groups records by the month they fall in.
///
/// Months iterate oldest first; call `.into_iter().rev()` for most recent
/// first. Records keep their input order within a month.
pub fn group_by_month(records: &[DailyRecord]) -> BTreeMap<MonthPeriod, Vec<DailyRecord>> {
    let mut grouped: BTreeMap<MonthPeriod, Vec<DailyRecord>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(MonthPeriod::from_date(record.date))
            .or_default()
            .push(record.clone());
    }
    grouped
}
