//! Tiered overtime split.
//!
//! A day's overtime is paid in two tiers: minutes up to the tier limit earn
//! the 50% premium and any minutes beyond it earn the 100% premium. The
//! split is applied to each day on its own, never to a monthly running
//! total.

use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

/// Default daily tier limit in minutes.
///
/// The first two hours of a day's overtime are paid at the 50% premium.
pub const DEFAULT_TIER_LIMIT_MINUTES: u32 = 120;

/// The result of splitting one day's overtime into tiers.
///
/// # Example
///
/// ```
/// use workday_engine::calculation::{split_overtime, DEFAULT_TIER_LIMIT_MINUTES};
///
/// let split = split_overtime(180, DEFAULT_TIER_LIMIT_MINUTES, 1);
/// assert_eq!(split.fifty_percent_minutes, 120);
/// assert_eq!(split.hundred_percent_minutes, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSplit {
    /// Minutes paid at the 50% premium (at most the tier limit).
    pub fifty_percent_minutes: u32,
    /// Minutes paid at the 100% premium (beyond the tier limit).
    pub hundred_percent_minutes: u32,
    /// The audit step recording this split.
    pub audit_step: AuditStep,
}

/// Splits overtime minutes into `(fifty, hundred)` tier minutes.
///
/// # Examples
///
/// ```
/// use workday_engine::calculation::tier_minutes;
///
/// assert_eq!(tier_minutes(90, 120), (90, 0));
/// assert_eq!(tier_minutes(120, 120), (120, 0));
/// assert_eq!(tier_minutes(240, 120), (120, 120));
/// ```
pub fn tier_minutes(overtime_minutes: u32, tier_limit_minutes: u32) -> (u32, u32) {
    if overtime_minutes <= tier_limit_minutes {
        (overtime_minutes, 0)
    } else {
        (tier_limit_minutes, overtime_minutes - tier_limit_minutes)
    }
}

/// Splits a day's overtime into its premium tiers.
///
/// # Arguments
///
/// * `overtime_minutes` - The positive balance of the day
/// * `tier_limit_minutes` - Minutes paid at the 50% premium before the
///   100% premium applies (typically 120)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// An [`OvertimeSplit`] containing:
/// - `fifty_percent_minutes`: minutes up to the limit
/// - `hundred_percent_minutes`: minutes beyond the limit (can be zero)
/// - `audit_step`: documentation of the split
pub fn split_overtime(
    overtime_minutes: u32,
    tier_limit_minutes: u32,
    step_number: u32,
) -> OvertimeSplit {
    let (fifty_percent_minutes, hundred_percent_minutes) =
        tier_minutes(overtime_minutes, tier_limit_minutes);

    let reasoning = if hundred_percent_minutes > 0 {
        format!(
            "{} overtime minutes exceed the {} minute limit by {}, paid at the 100% premium",
            overtime_minutes, tier_limit_minutes, hundred_percent_minutes
        )
    } else if overtime_minutes == tier_limit_minutes {
        format!(
            "{} overtime minutes equal the {} minute limit, all at the 50% premium",
            overtime_minutes, tier_limit_minutes
        )
    } else {
        format!(
            "{} overtime minutes are under the {} minute limit, all at the 50% premium",
            overtime_minutes, tier_limit_minutes
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_split".to_string(),
        rule_name: "Overtime Tier Split".to_string(),
        input: serde_json::json!({
            "overtime_minutes": overtime_minutes,
            "tier_limit_minutes": tier_limit_minutes
        }),
        output: serde_json::json!({
            "fifty_percent_minutes": fifty_percent_minutes,
            "hundred_percent_minutes": hundred_percent_minutes
        }),
        reasoning,
    };

    OvertimeSplit {
        fifty_percent_minutes,
        hundred_percent_minutes,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==========================================================================
    // OS-001: under the limit - all at 50%
    // ==========================================================================
    #[test]
    fn test_os_001_90_minutes_all_fifty() {
        let result = split_overtime(90, DEFAULT_TIER_LIMIT_MINUTES, 1);

        assert_eq!(result.fifty_percent_minutes, 90);
        assert_eq!(result.hundred_percent_minutes, 0);
        assert_eq!(result.audit_step.rule_id, "overtime_split");
        assert_eq!(result.audit_step.input["overtime_minutes"], 90);
        assert_eq!(result.audit_step.input["tier_limit_minutes"], 120);
        assert_eq!(result.audit_step.output["fifty_percent_minutes"], 90);
        assert_eq!(result.audit_step.output["hundred_percent_minutes"], 0);
    }

    // ==========================================================================
    // OS-002: exactly at the limit
    // ==========================================================================
    #[test]
    fn test_os_002_exactly_at_limit() {
        let result = split_overtime(120, DEFAULT_TIER_LIMIT_MINUTES, 1);

        assert_eq!(result.fifty_percent_minutes, 120);
        assert_eq!(result.hundred_percent_minutes, 0);
        assert!(result.audit_step.reasoning.contains("equal"));
    }

    // ==========================================================================
    // OS-003: one minute over the limit
    // ==========================================================================
    #[test]
    fn test_os_003_one_minute_over() {
        let result = split_overtime(121, DEFAULT_TIER_LIMIT_MINUTES, 1);

        assert_eq!(result.fifty_percent_minutes, 120);
        assert_eq!(result.hundred_percent_minutes, 1);
        assert!(result.audit_step.reasoning.contains("exceed"));
    }

    // ==========================================================================
    // OS-004: 4 hours of overtime
    // ==========================================================================
    #[test]
    fn test_os_004_240_minutes() {
        let result = split_overtime(240, DEFAULT_TIER_LIMIT_MINUTES, 1);

        assert_eq!(result.fifty_percent_minutes, 120);
        assert_eq!(result.hundred_percent_minutes, 120);
    }

    #[test]
    fn test_custom_limit() {
        let result = split_overtime(100, 60, 1);

        assert_eq!(result.fifty_percent_minutes, 60);
        assert_eq!(result.hundred_percent_minutes, 40);
        assert_eq!(result.audit_step.input["tier_limit_minutes"], 60);
    }

    #[test]
    fn test_zero_overtime() {
        let result = split_overtime(0, DEFAULT_TIER_LIMIT_MINUTES, 1);

        assert_eq!(result.fifty_percent_minutes, 0);
        assert_eq!(result.hundred_percent_minutes, 0);
        assert!(result.audit_step.reasoning.contains("under"));
    }

    #[test]
    fn test_step_number_passed_through() {
        let result = split_overtime(30, DEFAULT_TIER_LIMIT_MINUTES, 7);
        assert_eq!(result.audit_step.step_number, 7);
    }

    #[test]
    fn test_default_limit_constant() {
        assert_eq!(DEFAULT_TIER_LIMIT_MINUTES, 120);
    }

    proptest! {
        #[test]
        fn prop_tiers_sum_to_overtime(m in 1u32..5000, limit in 1u32..600) {
            let (fifty, hundred) = tier_minutes(m, limit);

            prop_assert_eq!(fifty + hundred, m);
            prop_assert!(fifty <= limit);
            prop_assert!(hundred == 0 || m > limit);
        }
    }
}
