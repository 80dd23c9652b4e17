//! Calculation logic for the Workday Balance Engine.
//!
//! This module contains the balance calculations: the signed balance of a
//! single day, the split of a day's overtime into premium tiers, the monthly
//! aggregation of those tiers, and the pay owed for them.

mod daily_balance;
mod monthly_aggregate;
mod overtime_pay;
mod overtime_split;

pub use daily_balance::{
    DailyBalanceResult, compute_daily_balance, compute_daily_balance_with_audit, record_warnings,
};
pub use monthly_aggregate::{
    MonthlyAggregation, aggregate_month, aggregate_month_with_audit, contribute_day,
};
pub use overtime_pay::{OvertimePayResult, calculate_overtime_pay};
pub use overtime_split::{DEFAULT_TIER_LIMIT_MINUTES, OvertimeSplit, split_overtime, tier_minutes};
