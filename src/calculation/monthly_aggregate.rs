//! Monthly balance aggregation.
//!
//! Folds the daily balances of a month into three buckets: 50%-tier
//! overtime, 100%-tier overtime and deficit. Every call starts from fresh
//! zero totals, so aggregations for different months or employees never
//! share state.

use tracing::debug;

use crate::models::{
    AuditStep, AuditWarning, BalanceSign, DailyBalance, DailyRecord, DayContribution,
    MonthlyBalance,
};

use super::daily_balance::{compute_daily_balance, compute_daily_balance_with_audit, record_warnings};
use super::overtime_split::{split_overtime, tier_minutes};

/// The result of aggregating a month with a full audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyAggregation {
    /// The month totals.
    pub balance: MonthlyBalance,
    /// How each record contributed, in input order.
    pub days: Vec<DayContribution>,
    /// Audit steps, numbered consecutively from the requested start.
    pub audit_steps: Vec<AuditStep>,
    /// Irregular records that were accepted.
    pub warnings: Vec<AuditWarning>,
}

fn contribution(record: &DailyRecord, balance: DailyBalance, tier_limit_minutes: u32) -> DayContribution {
    let (fifty, hundred, deficit) = match balance.sign {
        BalanceSign::Positive => {
            let (fifty, hundred) = tier_minutes(balance.minutes, tier_limit_minutes);
            (fifty, hundred, 0)
        }
        BalanceSign::Negative => (0, 0, balance.minutes),
        BalanceSign::None => (0, 0, 0),
    };

    DayContribution {
        date: record.date,
        balance,
        fifty_percent_minutes: fifty,
        hundred_percent_minutes: hundred,
        deficit_minutes: deficit,
    }
}

fn accumulate(mut totals: MonthlyBalance, day: &DayContribution) -> MonthlyBalance {
    totals.fifty_percent_minutes += day.fifty_percent_minutes;
    totals.hundred_percent_minutes += day.hundred_percent_minutes;
    totals.deficit_minutes += day.deficit_minutes;
    totals
}

/// Computes how a single record feeds into the monthly totals.
pub fn contribute_day(record: &DailyRecord, tier_limit_minutes: u32) -> DayContribution {
    contribution(record, compute_daily_balance(record), tier_limit_minutes)
}

/// Aggregates daily records into monthly totals.
///
/// Deficit days add their minutes to `deficit_minutes`. Overtime days are
/// split per day: up to `tier_limit_minutes` into the 50% tier and the rest
/// into the 100% tier. Even days add nothing. Record order does not matter
/// and an empty slice yields all zeros.
///
/// # Examples
///
/// ```
/// use workday_engine::calculation::{aggregate_month, DEFAULT_TIER_LIMIT_MINUTES};
/// use workday_engine::models::{ClockPair, DailyRecord};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let day = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
///
/// let records = vec![
///     DailyRecord::new(day(2), t(8, 0))
///         .with_pairs([ClockPair::new(t(8, 0), t(12, 0)), ClockPair::new(t(13, 0), t(18, 30))]),
///     DailyRecord::new(day(3), t(8, 0))
///         .with_pairs([ClockPair::new(t(7, 0), t(12, 0)), ClockPair::new(t(13, 0), t(20, 0))]),
///     DailyRecord::new(day(4), t(8, 0)).with_pairs([ClockPair::new(t(9, 0), t(12, 0))]),
/// ];
///
/// let balance = aggregate_month(&records, DEFAULT_TIER_LIMIT_MINUTES);
/// assert_eq!(balance.fifty_percent_minutes, 210);
/// assert_eq!(balance.hundred_percent_minutes, 120);
/// assert_eq!(balance.deficit_minutes, 300);
/// ```
pub fn aggregate_month(records: &[DailyRecord], tier_limit_minutes: u32) -> MonthlyBalance {
    records
        .iter()
        .map(|record| contribute_day(record, tier_limit_minutes))
        .fold(MonthlyBalance::default(), |totals, day| accumulate(totals, &day))
}

/// Aggregates daily records and documents every decision.
///
/// Each record produces a daily balance step, followed by an overtime split
/// step when the day is positive. The returned `balance` always equals
/// [`aggregate_month`] on the same input.
///
/// # Arguments
///
/// * `records` - The records of the month
/// * `tier_limit_minutes` - The daily limit of the 50% tier
/// * `step_number_start` - The step number of the first audit step
pub fn aggregate_month_with_audit(
    records: &[DailyRecord],
    tier_limit_minutes: u32,
    step_number_start: u32,
) -> MonthlyAggregation {
    let mut balance = MonthlyBalance::default();
    let mut days = Vec::with_capacity(records.len());
    let mut audit_steps = Vec::with_capacity(records.len() * 2);
    let mut warnings = Vec::new();
    let mut step_number = step_number_start;

    for record in records {
        let daily = compute_daily_balance_with_audit(record, step_number);
        audit_steps.push(daily.audit_step);
        step_number += 1;

        if daily.balance.sign == BalanceSign::Positive {
            let split = split_overtime(daily.balance.minutes, tier_limit_minutes, step_number);
            audit_steps.push(split.audit_step);
            step_number += 1;
        }

        let day = contribution(record, daily.balance, tier_limit_minutes);
        balance = accumulate(balance, &day);
        days.push(day);
        warnings.extend(record_warnings(record));
    }

    debug!(
        days = records.len(),
        fifty_percent_minutes = balance.fifty_percent_minutes,
        hundred_percent_minutes = balance.hundred_percent_minutes,
        deficit_minutes = balance.deficit_minutes,
        warnings = warnings.len(),
        "Aggregated monthly balance"
    );

    MonthlyAggregation {
        balance,
        days,
        audit_steps,
        warnings,
    }
}
