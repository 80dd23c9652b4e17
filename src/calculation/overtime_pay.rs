//! Overtime pay for a month's tier totals.
//!
//! Converts the 50% and 100% tier minutes of a [`MonthlyBalance`] into money
//! at an hourly rate, using the premium multipliers from configuration.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::{OvertimeConfig, PremiumTier};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, MonthlyBalance, PayCategory, PayLine};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// The result of overtime pay calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePayResult {
    /// One pay line per non-empty tier (0, 1, or 2 lines).
    pub pay_lines: Vec<PayLine>,
    /// Audit steps recording each tier calculation.
    pub audit_steps: Vec<AuditStep>,
    /// The sum of the pay line amounts.
    pub total_amount: Decimal,
}

/// Calculates overtime pay for a month's tier totals.
///
/// For each tier with minutes, `rate = hourly_rate * multiplier` and
/// `amount = minutes * rate / 60`, rounded to cents with midpoints away from
/// zero and carried at two decimal places. `hours` is reported to four
/// decimal places. Empty tiers produce neither a pay line nor an audit step.
///
/// # Errors
///
/// Returns [`EngineError::RateOverflow`] when the rate is too large for the
/// products to fit in a `Decimal`.
///
/// # Example
///
/// ```
/// use workday_engine::calculation::calculate_overtime_pay;
/// use workday_engine::config::OvertimeConfig;
/// use workday_engine::models::{MonthlyBalance, PayCategory};
/// use rust_decimal::Decimal;
///
/// let balance = MonthlyBalance {
///     fifty_percent_minutes: 210,
///     hundred_percent_minutes: 120,
///     deficit_minutes: 0,
/// };
///
/// let result =
///     calculate_overtime_pay(&balance, Decimal::new(2000, 2), &OvertimeConfig::default(), 1)
///         .unwrap();
///
/// assert_eq!(result.pay_lines.len(), 2);
/// assert_eq!(result.pay_lines[0].category, PayCategory::Overtime50);
/// assert_eq!(result.pay_lines[0].amount, Decimal::new(10500, 2));
/// assert_eq!(result.pay_lines[1].amount, Decimal::new(8000, 2));
/// assert_eq!(result.total_amount, Decimal::new(18500, 2));
/// ```
pub fn calculate_overtime_pay(
    balance: &MonthlyBalance,
    hourly_rate: Decimal,
    overtime: &OvertimeConfig,
    step_number_start: u32,
) -> EngineResult<OvertimePayResult> {
    let tiers = [
        (
            PayCategory::Overtime50,
            balance.fifty_percent_minutes,
            &overtime.fifty_percent,
            "overtime_pay_50",
        ),
        (
            PayCategory::Overtime100,
            balance.hundred_percent_minutes,
            &overtime.hundred_percent,
            "overtime_pay_100",
        ),
    ];

    let mut pay_lines = Vec::new();
    let mut audit_steps = Vec::new();
    let mut step_number = step_number_start;

    for (category, minutes, tier, rule_id) in tiers {
        if minutes == 0 {
            continue;
        }

        let (pay_line, audit_step) =
            tier_pay(category, minutes, hourly_rate, tier, rule_id, step_number)?;
        pay_lines.push(pay_line);
        audit_steps.push(audit_step);
        step_number += 1;
    }

    let total_amount = pay_lines
        .iter()
        .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.amount))
        .ok_or(EngineError::RateOverflow { hourly_rate })?;

    Ok(OvertimePayResult {
        pay_lines,
        audit_steps,
        total_amount,
    })
}

fn tier_pay(
    category: PayCategory,
    minutes: u32,
    hourly_rate: Decimal,
    tier: &PremiumTier,
    rule_id: &str,
    step_number: u32,
) -> EngineResult<(PayLine, AuditStep)> {
    let overflow = || EngineError::RateOverflow { hourly_rate };

    let minutes_dec = Decimal::from(minutes);
    let rate = hourly_rate.checked_mul(tier.multiplier).ok_or_else(overflow)?;
    let hours = (minutes_dec / MINUTES_PER_HOUR).round_dp(4);
    let mut amount = minutes_dec
        .checked_mul(rate)
        .and_then(|total| total.checked_div(MINUTES_PER_HOUR))
        .ok_or_else(overflow)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);
    let percent = tier
        .multiplier
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(overflow)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: format!("Overtime Pay ({})", tier.label),
        input: serde_json::json!({
            "minutes": minutes,
            "hourly_rate": hourly_rate.normalize().to_string(),
            "multiplier": tier.multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "hours": hours.normalize().to_string(),
            "rate": rate.normalize().to_string(),
            "amount": amount.to_string()
        }),
        reasoning: format!(
            "{} minutes ({} hours) at {}% of ${}: ${}/h = ${}",
            minutes,
            hours.normalize(),
            percent.normalize(),
            hourly_rate.normalize(),
            rate.normalize(),
            amount
        ),
    };

    let pay_line = PayLine {
        category,
        minutes,
        hours,
        multiplier: tier.multiplier,
        rate,
        amount,
    };

    Ok((pay_line, audit_step))
}
