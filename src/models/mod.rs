//! Core data models for the Workday Balance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod balance;
mod calculation_result;
mod daily_record;
mod month;

pub use balance::{BalanceSign, DailyBalance, FormattedMonthlyBalance, FormattedOvertime, MonthlyBalance};
pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, BalanceReport, DayContribution, PayCategory, PayLine,
};
pub use daily_record::{ClockPair, DailyRecord, PAIRS_PER_DAY, PairPolicy};
pub use month::{MonthPeriod, group_by_month, records_in_month};
