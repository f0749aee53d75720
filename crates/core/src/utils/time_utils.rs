use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::{Result, ValidationError};

/// Default timezone for calendar boundaries (start of month, "today").
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::UTC;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Converts a UTC instant to the calendar date observed in `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// First day of the month containing `date`.
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns the first and last calendar day of `month` in `year`.
///
/// Fails with a validation error when `month` is outside `1..=12`.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        ValidationError::InvalidInput(format!("Invalid report month {}-{}", year, month))
    })?;
    let (next_year, next_month) = shift_month(year, month, 1);
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| {
            ValidationError::InvalidInput(format!("Invalid report month {}-{}", year, month))
        })?;
    Ok((first, last))
}

/// Moves `(year, month)` by `delta` months, wrapping across years.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let zero_based = year * 12 + month as i32 - 1 + delta;
    (zero_based.div_euclid(12), zero_based.rem_euclid(12) as u32 + 1)
}

/// The instant at which the current local month started (00:00:00 on the 1st in `tz`).
pub fn start_of_local_month(now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let first = first_day_of_month(local_date(now, tz));
    let midnight = first.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Short English month label ("Jan".."Dec").
pub fn month_label(month: u32) -> &'static str {
    MONTH_LABELS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}
