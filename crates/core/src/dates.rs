//! Date and time-of-day parsing plus the named date windows used by the
//! show list filters.
//!
//! "Local" always means the directory's configured time zone. Every public
//! function takes `now` explicitly so callers (and tests) control the clock.

use chrono::{
    DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde_json::json;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Time zone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Start time assumed for a submitted show given only a calendar date (8 PM).
pub const DEFAULT_SHOW_HOUR: u32 = 20;

/// Hours west of UTC used when a local time does not resolve in the zone.
const FALLBACK_UTC_OFFSET_HOURS: i64 = 5;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A half-open `[from, to)` window, or an inclusive range for user-supplied
/// bounds. The repository query decides which comparison to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: Timestamp,
    pub to: Timestamp,
}

impl DateRange {
    /// Resolve `date_from` / `date_to` query values.
    ///
    /// - A bare `YYYY-MM-DD` `date_from` means local midnight.
    /// - A bare `date_to` means 23:59:59 local on that day.
    /// - RFC 3339 timestamps are taken as-is.
    /// - A missing `date_from` is `now`; a missing `date_to` is one year out.
    pub fn resolve(
        from: Option<&str>,
        to: Option<&str>,
        now: Timestamp,
        tz: Tz,
    ) -> Result<Self, CoreError> {
        let invalid = || {
            CoreError::invalid_param("date_from/date_to", "invalid date format, use ISO 8601")
        };

        let from = match non_blank(from) {
            None => now,
            Some(raw) => parse_bound(raw, NaiveTime::MIN, tz).ok_or_else(invalid)?,
        };

        let to = match non_blank(to) {
            None => now
                .checked_add_months(Months::new(12))
                .unwrap_or_else(|| now + Duration::days(365)),
            Some(raw) => parse_bound(raw, end_of_day(), tz).ok_or_else(invalid)?,
        };

        Ok(Self { from, to })
    }
}

/// `[local midnight today, local midnight tomorrow)`.
pub fn tonight_window(now: Timestamp, tz: Tz) -> DateRange {
    let today = local_date(now, tz);
    let tomorrow = today.succ_opt().unwrap_or(NaiveDate::MAX);
    DateRange {
        from: local_midnight(today, tz),
        to: local_midnight(tomorrow, tz),
    }
}

/// Friday 00:00 through Monday 00:00 local.
///
/// On Friday, Saturday or Sunday this is the current weekend, starting no
/// earlier than today; otherwise it is the coming weekend.
pub fn weekend_window(now: Timestamp, tz: Tz) -> DateRange {
    let today = local_date(now, tz);
    let weekday = i64::from(today.weekday().num_days_from_monday());
    let friday_offset = 4 - weekday;

    let friday = if friday_offset >= 0 {
        today.checked_add_days(Days::new(friday_offset.unsigned_abs()))
    } else {
        today.checked_sub_days(Days::new(friday_offset.unsigned_abs()))
    }
    .unwrap_or(today);
    let monday = friday.checked_add_days(Days::new(3)).unwrap_or(NaiveDate::MAX);

    DateRange {
        from: local_midnight(friday.max(today), tz),
        to: local_midnight(monday, tz),
    }
}

/// Parse a submitted show date.
///
/// Accepts an RFC 3339 timestamp, or a bare date which is placed at
/// [`DEFAULT_SHOW_HOUR`] local time.
pub fn parse_show_date(raw: &str, tz: Tz) -> Result<Timestamp, CoreError> {
    let show_time = NaiveTime::from_hms_opt(DEFAULT_SHOW_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    parse_bound(raw.trim(), show_time, tz).ok_or_else(|| {
        CoreError::validation(
            "Invalid date format",
            json!({ "date": "must be valid ISO 8601 date" }),
        )
    })
}

/// Parse an optional `HH:MM` or `HH:MM:SS` time of day.
///
/// Unparseable input yields `None` rather than an error.
pub fn parse_time_of_day(raw: Option<&str>) -> Option<NaiveTime> {
    let raw = non_blank(raw)?;
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// Convert a local wall-clock time to UTC.
///
/// Falls back to a fixed UTC-5 offset when the wall-clock time does not
/// exist in `tz` (inside a DST gap).
pub fn local_to_utc(tz: Tz, local: NaiveDateTime) -> Timestamp {
    match tz.from_local_datetime(&local).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&(local + Duration::hours(FALLBACK_UTC_OFFSET_HOURS))),
    }
}

fn parse_bound(raw: &str, bare_date_time: NaiveTime, tz: Tz) -> Option<Timestamp> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(local_to_utc(tz, date.and_time(bare_date_time)));
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn local_date(now: Timestamp, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

fn local_midnight(date: NaiveDate, tz: Tz) -> Timestamp {
    local_to_utc(tz, date.and_time(NaiveTime::MIN))
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
