//! Daily balance calculation.
//!
//! A day owes its contracted workload. Every complete arrival/leaving pair
//! pays some of it back; whatever is left over (or still owed) is the day's
//! balance.

use crate::models::{AuditStep, AuditWarning, ClockPair, DailyBalance, DailyRecord};

/// The result of computing a daily balance with its audit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBalanceResult {
    /// The day's balance.
    pub balance: DailyBalance,
    /// The audit step recording the computation.
    pub audit_step: AuditStep,
}

/// Computes the signed balance of a single day.
///
/// The balance starts at minus the workload. Each pair with both sides set
/// adds `leaving - arrival`; a pair with a side missing adds nothing. The
/// function never fails and does not check that arrival precedes leaving.
///
/// # Examples
///
/// ## Overtime day
///
/// ```
/// use workday_engine::calculation::compute_daily_balance;
/// use workday_engine::models::{BalanceSign, ClockPair, DailyRecord};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let record = DailyRecord::new(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), t(8, 0))
///     .with_pairs([ClockPair::new(t(8, 0), t(12, 0)), ClockPair::new(t(13, 0), t(18, 30))]);
///
/// let balance = compute_daily_balance(&record);
/// assert_eq!(balance.sign, BalanceSign::Positive);
/// assert_eq!(balance.minutes, 90);
/// ```
///
/// ## Day with no punches
///
/// ```
/// use workday_engine::calculation::compute_daily_balance;
/// use workday_engine::models::{BalanceSign, DailyRecord};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let record = DailyRecord::new(
///     NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
///     NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
/// );
///
/// let balance = compute_daily_balance(&record);
/// assert_eq!(balance.sign, BalanceSign::Negative);
/// assert_eq!(balance.minutes, 360);
/// ```
pub fn compute_daily_balance(record: &DailyRecord) -> DailyBalance {
    let balance_minutes = record
        .pairs
        .iter()
        .filter_map(ClockPair::worked_minutes)
        .fold(-record.workload_minutes(), |balance, worked| balance + worked);

    DailyBalance::from_signed_minutes(balance_minutes)
}

/// Computes the daily balance and records an audit step for it.
///
/// # Arguments
///
/// * `record` - The day to balance
/// * `step_number` - The step number for audit trail sequencing
pub fn compute_daily_balance_with_audit(
    record: &DailyRecord,
    step_number: u32,
) -> DailyBalanceResult {
    let balance = compute_daily_balance(record);
    let workload = record.workload_minutes();
    let worked = record.worked_minutes();
    let counted_pairs = record
        .pairs
        .iter()
        .filter(|pair| pair.worked_minutes().is_some())
        .count();

    let reasoning = format!(
        "{} minutes worked across {} complete pair(s) against a {} minute workload gives {}",
        worked, counted_pairs, workload, balance
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "daily_balance".to_string(),
        rule_name: "Daily Balance".to_string(),
        input: serde_json::json!({
            "date": record.date.to_string(),
            "workload_minutes": workload,
            "worked_minutes": worked,
            "complete_pairs": counted_pairs
        }),
        output: serde_json::json!({
            "sign": balance.sign,
            "minutes": balance.minutes
        }),
        reasoning,
    };

    DailyBalanceResult {
        balance,
        audit_step,
    }
}

/// Lists the irregularities in a record that the balance silently absorbs.
///
/// Half-filled pairs are counted as zero and reversed pairs as negative
/// time; both are accepted but flagged.
pub fn record_warnings(record: &DailyRecord) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    for (index, pair) in record.pairs.iter().enumerate() {
        let position = index + 1;
        if pair.is_partial() {
            warnings.push(AuditWarning {
                code: "INCOMPLETE_PAIR".to_string(),
                message: format!(
                    "{}: pair {} has only one side set and counts as zero",
                    record.date, position
                ),
                severity: "medium".to_string(),
            });
        } else if pair.worked_minutes().is_some_and(|minutes| minutes < 0) {
            warnings.push(AuditWarning {
                code: "REVERSED_PAIR".to_string(),
                message: format!(
                    "{}: pair {} leaves before it arrives and counts as negative time",
                    record.date, position
                ),
                severity: "high".to_string(),
            });
        }
    }

    warnings
}
