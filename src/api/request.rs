//! Request types for the Workday Balance Engine API.
//!
//! Clock values arrive as `HH:MM` text and are parsed into a [`DailyRecord`]
//! here, before any calculation sees them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::clock::{parse_clock_field, parse_workload};
use crate::error::EngineError;
use crate::models::{ClockPair, DailyRecord, PAIRS_PER_DAY};

/// One day of timesheet input, as submitted by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkdayRequest {
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// The contracted workload for the day (`HH:MM`).
    pub workload: String,
    /// First arrival (`HH:MM`, blank or `00:00` for unset).
    #[serde(default)]
    pub arrival1: Option<String>,
    /// First leaving.
    #[serde(default)]
    pub leaving1: Option<String>,
    /// Second arrival.
    #[serde(default)]
    pub arrival2: Option<String>,
    /// Second leaving.
    #[serde(default)]
    pub leaving2: Option<String>,
    /// Third arrival.
    #[serde(default)]
    pub arrival3: Option<String>,
    /// Third leaving.
    #[serde(default)]
    pub leaving3: Option<String>,
}

impl TryFrom<WorkdayRequest> for DailyRecord {
    type Error = EngineError;

    fn try_from(req: WorkdayRequest) -> Result<Self, Self::Error> {
        let workload = parse_workload(&req.workload)?;

        let fields = [
            (&req.arrival1, &req.leaving1),
            (&req.arrival2, &req.leaving2),
            (&req.arrival3, &req.leaving3),
        ];
        let mut pairs = [ClockPair::default(); PAIRS_PER_DAY];
        for (index, (arrival, leaving)) in fields.into_iter().enumerate() {
            let position = index + 1;
            pairs[index] = ClockPair {
                arrival: parse_clock_field(&format!("arrival{}", position), arrival.as_deref())?,
                leaving: parse_clock_field(&format!("leaving{}", position), leaving.as_deref())?,
            };
        }

        Ok(DailyRecord::new(req.date, workload).with_pairs(pairs))
    }
}

/// Request body for the `/balance/monthly` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyBalanceRequest {
    /// The month to report on, as `YYYY-MM`. Defaults to the current month.
    #[serde(default)]
    pub month: Option<String>,
    /// Hourly rate for overtime pay. No pay lines are produced without it.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// The submitted records. Records outside the month are dropped.
    pub workdays: Vec<WorkdayRequest>,
}

/// Request body for the `/balance/months` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthsRequest {
    /// Hourly rate for overtime pay, applied to every month.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// The submitted records, spanning any number of months.
    pub workdays: Vec<WorkdayRequest>,
}
