//! Clock value parsing and formatting.
//!
//! Timesheet fields arrive as `HH:MM` text. This module turns them into
//! [`NaiveTime`] values before any record reaches the calculation layer, and
//! renders minute totals back into `HH:MM` for display.

use chrono::{NaiveTime, Timelike};

use crate::error::{EngineError, EngineResult};

/// Length of a well-formed `HH:MM` value.
const CLOCK_TEXT_LEN: usize = 5;

/// Returns the whole minutes elapsed since midnight for a clock value.
///
/// Seconds are truncated.
///
/// # Examples
///
/// ```
/// use workday_engine::clock::minutes_since_midnight;
/// use chrono::NaiveTime;
///
/// let time = NaiveTime::from_hms_opt(8, 30, 45).unwrap();
/// assert_eq!(minutes_since_midnight(time), 510);
/// ```
pub fn minutes_since_midnight(time: NaiveTime) -> i32 {
    (time.num_seconds_from_midnight() / 60) as i32
}

/// Parses a strict `HH:MM` value.
///
/// Returns `None` when the text is not exactly five characters of the form
/// `DD:DD` or does not name a valid time of day. chrono accepts single digit
/// hours, so the shape is checked first.
fn parse_hh_mm(text: &str) -> Option<NaiveTime> {
    let bytes = text.as_bytes();
    if bytes.len() != CLOCK_TEXT_LEN || bytes[2] != b':' {
        return None;
    }

    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }

    NaiveTime::parse_from_str(text, "%H:%M").ok()
}

/// Parses an arrival or leaving field.
///
/// Absent or empty input means the field is unset. `00:00` is also treated
/// as unset: a clock field left at midnight was never punched.
///
/// # Arguments
///
/// * `field` - The field name, used in the validation error
/// * `text` - The raw input, if any
///
/// # Errors
///
/// Returns [`EngineError::InvalidTime`] when the text is not a valid `HH:MM`
/// value.
///
/// # Examples
///
/// ```
/// use workday_engine::clock::parse_clock_field;
/// use chrono::NaiveTime;
///
/// let arrival = parse_clock_field("arrival1", Some("08:15")).unwrap();
/// assert_eq!(arrival, NaiveTime::from_hms_opt(8, 15, 0));
///
/// assert_eq!(parse_clock_field("leaving1", Some("")).unwrap(), None);
/// assert_eq!(parse_clock_field("leaving1", Some("00:00")).unwrap(), None);
/// assert!(parse_clock_field("leaving1", Some("8:15")).is_err());
/// ```
pub fn parse_clock_field(field: &str, text: Option<&str>) -> EngineResult<Option<NaiveTime>> {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let time = parse_hh_mm(text).ok_or_else(|| EngineError::InvalidTime {
        field: field.to_string(),
        value: text.to_string(),
    })?;

    if time == NaiveTime::MIN {
        return Ok(None);
    }

    Ok(Some(time))
}

/// Parses the contracted workload field.
///
/// Unlike clock fields the workload is required, and `00:00` is a valid
/// zero workload.
///
/// # Examples
///
/// ```
/// use workday_engine::clock::parse_workload;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_workload("08:00").unwrap(), NaiveTime::from_hms_opt(8, 0, 0).unwrap());
/// assert_eq!(parse_workload("00:00").unwrap(), NaiveTime::MIN);
/// assert!(parse_workload("").is_err());
/// ```
pub fn parse_workload(text: &str) -> EngineResult<NaiveTime> {
    parse_hh_mm(text).ok_or_else(|| EngineError::InvalidTime {
        field: "workload".to_string(),
        value: text.to_string(),
    })
}

/// Formats a minute total as `HH:MM`.
///
/// Hours are not wrapped at 24, so monthly totals stay readable.
///
/// # Examples
///
/// ```
/// use workday_engine::clock::format_minutes;
///
/// assert_eq!(format_minutes(90), "01:30");
/// assert_eq!(format_minutes(1830), "30:30");
/// ```
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Formats a signed minute delta as `+HH:MM` or `-HH:MM`.
///
/// Zero renders without a sign.
///
/// # Examples
///
/// ```
/// use workday_engine::clock::format_signed_minutes;
///
/// assert_eq!(format_signed_minutes(90), "+01:30");
/// assert_eq!(format_signed_minutes(-300), "-05:00");
/// assert_eq!(format_signed_minutes(0), "00:00");
/// ```
pub fn format_signed_minutes(minutes: i32) -> String {
    let magnitude = format_minutes(minutes.unsigned_abs());
    match minutes.signum() {
        1 => format!("+{}", magnitude),
        -1 => format!("-{}", magnitude),
        _ => magnitude,
    }
}
