//! Balance models.
//!
//! [`DailyBalance`] is the signed delta of a single day against its workload.
//! [`MonthlyBalance`] is the folded result for a month, with overtime split
//! into its two premium tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::{format_minutes, format_signed_minutes};

/// The direction of a day's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSign {
    /// More time worked than the workload.
    Positive,
    /// Less time worked than the workload.
    Negative,
    /// Worked time matched the workload exactly.
    None,
}

/// The balance of a single day.
///
/// Derived from a [`DailyRecord`](super::DailyRecord) and never stored.
///
/// # Example
///
/// ```
/// use workday_engine::models::{BalanceSign, DailyBalance};
///
/// let balance = DailyBalance::from_signed_minutes(-300);
/// assert_eq!(balance.sign, BalanceSign::Negative);
/// assert_eq!(balance.minutes, 300);
/// assert_eq!(balance.to_string(), "-05:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBalance {
    /// The magnitude of the delta in minutes.
    pub minutes: u32,
    /// The direction of the delta.
    pub sign: BalanceSign,
}

impl DailyBalance {
    /// Builds a balance from a signed minute delta.
    pub fn from_signed_minutes(delta: i32) -> Self {
        let sign = match delta.signum() {
            1 => BalanceSign::Positive,
            -1 => BalanceSign::Negative,
            _ => BalanceSign::None,
        };

        Self {
            minutes: delta.unsigned_abs(),
            sign,
        }
    }

    /// Returns the delta with its sign applied.
    pub fn signed_minutes(&self) -> i32 {
        let magnitude = self.minutes as i32;
        match self.sign {
            BalanceSign::Negative => -magnitude,
            BalanceSign::Positive => magnitude,
            BalanceSign::None => 0,
        }
    }
}

impl fmt::Display for DailyBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_signed_minutes(self.signed_minutes()))
    }
}

/// Monthly totals of overtime and deficit minutes.
///
/// Overtime is split per day: minutes up to the tier limit fall into the 50%
/// tier, the rest into the 100% tier.
///
/// # Example
///
/// ```
/// use workday_engine::models::MonthlyBalance;
///
/// let balance = MonthlyBalance {
///     fifty_percent_minutes: 210,
///     hundred_percent_minutes: 120,
///     deficit_minutes: 300,
/// };
/// assert_eq!(balance.overtime_minutes(), 330);
/// assert_eq!(balance.formatted().positive.fifty, "03:30");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBalance {
    /// Overtime minutes paid at the 50% premium.
    pub fifty_percent_minutes: u32,
    /// Overtime minutes paid at the 100% premium.
    pub hundred_percent_minutes: u32,
    /// Minutes short of the workload across the month.
    pub deficit_minutes: u32,
}

impl MonthlyBalance {
    /// Returns the overtime minutes across both tiers.
    pub fn overtime_minutes(&self) -> u32 {
        self.fifty_percent_minutes + self.hundred_percent_minutes
    }

    /// Returns true when every bucket is empty.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Renders the totals as `HH:MM` strings.
    pub fn formatted(&self) -> FormattedMonthlyBalance {
        FormattedMonthlyBalance {
            positive: FormattedOvertime {
                fifty: format_minutes(self.fifty_percent_minutes),
                hundred: format_minutes(self.hundred_percent_minutes),
            },
            negative: format_minutes(self.deficit_minutes),
        }
    }
}

/// Overtime totals rendered as `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedOvertime {
    /// The 50% tier total.
    pub fifty: String,
    /// The 100% tier total.
    pub hundred: String,
}

/// A [`MonthlyBalance`] rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedMonthlyBalance {
    /// Overtime totals by tier.
    pub positive: FormattedOvertime,
    /// The deficit total.
    pub negative: String,
}
