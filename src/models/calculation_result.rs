//! Calculation result models for the Workday Balance Engine.
//!
//! This module contains the [`BalanceReport`] type and its associated
//! structures: per-day contributions, overtime pay lines and the audit trace
//! recording every decision of a monthly calculation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DailyBalance, FormattedMonthlyBalance, MonthPeriod, MonthlyBalance};

/// The overtime tier a pay line is paid at.
///
/// # Example
///
/// ```
/// use workday_engine::models::PayCategory;
///
/// let category = PayCategory::Overtime50;
/// assert_eq!(format!("{:?}", category), "Overtime50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayCategory {
    /// Overtime paid with a 50% premium.
    Overtime50,
    /// Overtime paid with a 100% premium.
    Overtime100,
}

/// A single overtime pay line for a month.
///
/// # Example
///
/// ```
/// use workday_engine::models::{PayLine, PayCategory};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let pay_line = PayLine {
///     category: PayCategory::Overtime50,
///     minutes: 210,
///     hours: Decimal::from_str("3.5").unwrap(),
///     multiplier: Decimal::from_str("1.5").unwrap(),
///     rate: Decimal::from_str("30.00").unwrap(),
///     amount: Decimal::from_str("105.00").unwrap(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayLine {
    /// The tier the minutes are paid at.
    pub category: PayCategory,
    /// The overtime minutes in this tier.
    pub minutes: u32,
    /// The same minutes expressed as hours.
    pub hours: Decimal,
    /// The premium multiplier applied to the hourly rate.
    pub multiplier: Decimal,
    /// The hourly rate with the premium applied.
    pub rate: Decimal,
    /// The total amount for this pay line (hours * rate), rounded to cents.
    pub amount: Decimal,
}

/// How one day fed into the monthly totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayContribution {
    /// The date of the record.
    pub date: NaiveDate,
    /// The day's balance.
    pub balance: DailyBalance,
    /// Minutes added to the 50% tier.
    pub fifty_percent_minutes: u32,
    /// Minutes added to the 100% tier.
    pub hundred_percent_minutes: u32,
    /// Minutes added to the deficit.
    pub deficit_minutes: u32,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag records that were accepted but may need a second look,
/// such as a half-filled clock pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use workday_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a monthly balance calculation.
///
/// # Example
///
/// ```
/// use workday_engine::models::{AuditTrace, BalanceReport, MonthPeriod, MonthlyBalance};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let balance = MonthlyBalance::default();
/// let report = BalanceReport {
///     calculation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "1.0.0".to_string(),
///     month: MonthPeriod::new(2026, 1).unwrap(),
///     balance,
///     formatted: balance.formatted(),
///     days: vec![],
///     pay_lines: vec![],
///     overtime_pay_total: None,
///     audit_trace: AuditTrace {
///         steps: vec![],
///         warnings: vec![],
///         duration_us: 0,
///     },
/// };
/// assert!(report.balance.is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The month the report covers.
    pub month: MonthPeriod,
    /// The minute totals.
    pub balance: MonthlyBalance,
    /// The minute totals rendered as `HH:MM`.
    pub formatted: FormattedMonthlyBalance,
    /// Per-day contributions, in input order.
    pub days: Vec<DayContribution>,
    /// Overtime pay lines, present when an hourly rate was supplied.
    #[serde(default)]
    pub pay_lines: Vec<PayLine>,
    /// The sum of the pay lines, present when an hourly rate was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overtime_pay_total: Option<Decimal>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
