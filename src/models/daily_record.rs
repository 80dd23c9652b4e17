//! Daily timesheet record model.
//!
//! This module defines the [`DailyRecord`] and [`ClockPair`] types that the
//! balance calculation consumes. Records are already validated: clock values
//! are structured [`NaiveTime`]s, never raw text.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock::minutes_since_midnight;
use crate::error::{EngineError, EngineResult};

/// The number of arrival/leaving pairs a record can hold.
pub const PAIRS_PER_DAY: usize = 3;

/// How a half-filled arrival/leaving pair is handled before calculation.
///
/// The balance calculation always treats such a pair as contributing zero
/// minutes; this policy decides whether a caller should refuse the record
/// up front instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairPolicy {
    /// Half-filled pairs contribute nothing.
    #[default]
    Ignore,
    /// Half-filled pairs make the record invalid.
    Reject,
}

/// One arrival/leaving pair within a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockPair {
    /// The time the employee clocked in.
    #[serde(default)]
    pub arrival: Option<NaiveTime>,
    /// The time the employee clocked out.
    #[serde(default)]
    pub leaving: Option<NaiveTime>,
}

impl ClockPair {
    /// Creates a pair with both sides set.
    pub fn new(arrival: NaiveTime, leaving: NaiveTime) -> Self {
        Self {
            arrival: Some(arrival),
            leaving: Some(leaving),
        }
    }

    /// Returns true if exactly one side of the pair is set.
    pub fn is_partial(&self) -> bool {
        self.arrival.is_some() != self.leaving.is_some()
    }

    /// Returns the minutes between arrival and leaving.
    ///
    /// `None` unless both sides are set. A leaving time earlier than the
    /// arrival yields a negative value.
    ///
    /// # Examples
    ///
    /// ```
    /// use workday_engine::models::ClockPair;
    /// use chrono::NaiveTime;
    ///
    /// let pair = ClockPair::new(
    ///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    ///     NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
    /// );
    /// assert_eq!(pair.worked_minutes(), Some(270));
    ///
    /// let open = ClockPair {
    ///     arrival: NaiveTime::from_hms_opt(13, 0, 0),
    ///     leaving: None,
    /// };
    /// assert_eq!(open.worked_minutes(), None);
    /// ```
    pub fn worked_minutes(&self) -> Option<i32> {
        match (self.arrival, self.leaving) {
            (Some(arrival), Some(leaving)) => {
                Some(minutes_since_midnight(leaving) - minutes_since_midnight(arrival))
            }
            _ => None,
        }
    }
}

/// One day of clock records for an employee.
///
/// The workload is the contracted time for the day, held as a clock value
/// measured from midnight (`08:00:00` is eight hours). It cannot be missing
/// or negative.
///
/// # Example
///
/// ```
/// use workday_engine::models::{ClockPair, DailyRecord};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let record = DailyRecord::new(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), t(8, 0))
///     .with_pairs([ClockPair::new(t(8, 0), t(12, 0)), ClockPair::new(t(13, 0), t(18, 30))]);
///
/// assert_eq!(record.workload_minutes(), 480);
/// assert_eq!(record.worked_minutes(), 570);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// The contracted work time for the day.
    pub workload: NaiveTime,
    /// Up to three arrival/leaving pairs, in punch order.
    #[serde(default)]
    pub pairs: [ClockPair; PAIRS_PER_DAY],
}

impl DailyRecord {
    /// Creates a record with no clock pairs set.
    pub fn new(date: NaiveDate, workload: NaiveTime) -> Self {
        Self {
            date,
            workload,
            pairs: [ClockPair::default(); PAIRS_PER_DAY],
        }
    }

    /// Fills the pair slots in order. Pairs beyond the third are dropped.
    pub fn with_pairs<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = ClockPair>,
    {
        for (slot, pair) in self.pairs.iter_mut().zip(pairs) {
            *slot = pair;
        }
        self
    }

    /// Returns the contracted workload in minutes.
    pub fn workload_minutes(&self) -> i32 {
        minutes_since_midnight(self.workload)
    }

    /// Returns the total minutes across all complete pairs.
    pub fn worked_minutes(&self) -> i32 {
        self.pairs.iter().filter_map(ClockPair::worked_minutes).sum()
    }

    /// Returns the 1-based positions of pairs with only one side set.
    pub fn incomplete_pairs(&self) -> Vec<usize> {
        self.pairs
            .iter()
            .enumerate()
            .filter(|(_, pair)| pair.is_partial())
            .map(|(index, _)| index + 1)
            .collect()
    }

    /// Checks the record against a [`PairPolicy`].
    ///
    /// # Errors
    ///
    /// Under [`PairPolicy::Reject`], returns
    /// [`EngineError::IncompleteRecord`] for the first half-filled pair.
    pub fn check_pairs(&self, policy: PairPolicy) -> EngineResult<()> {
        if policy == PairPolicy::Ignore {
            return Ok(());
        }

        match self.incomplete_pairs().first() {
            Some(&pair) => Err(EngineError::IncompleteRecord {
                date: self.date,
                pair,
            }),
            None => Ok(()),
        }
    }
}
