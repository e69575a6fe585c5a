//! Parsing of compact `"HH:MM-HH:MM"` interval lists.
//!
//! Clock times carry no date, so every parsed endpoint is placed on the
//! calendar day (and in the zone) of a caller-supplied reference instant.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike};
use serde::Serialize;

use crate::error::{Result, TimeRangeError};
use crate::range::{min, resolve_local, TimeRange};

/// What to do with an interval whose end clock time is before its start,
/// e.g. `"17:00-09:00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum InvertedPolicy {
    /// Fail with [`TimeRangeError::InvalidRange`].
    #[default]
    Reject,
    /// Exchange the endpoints, so `"17:00-09:00"` becomes 09:00–17:00.
    Swap,
    /// Move the end to the following day, so `"22:00-06:00"` spans midnight.
    Overnight,
}

/// Options for [`parse_with_options`].
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Handling of intervals that end before they start.
    pub inverted: InvertedPolicy,
}

/// Parse a list of `"HH:MM-HH:MM"` intervals onto `reference`'s calendar day.
///
/// Inverted intervals are rejected. For other handling, use
/// [`parse_with_options`].
///
/// # Errors
///
/// Returns [`TimeRangeError::MalformedInterval`] if any value is not two
/// clock times joined by a single `-`, or [`TimeRangeError::InvalidRange`] if
/// any value ends before it starts. Parsing stops at the first failure.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use timerange::parse;
///
/// let reference = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
/// let ranges = parse(&reference, &["09:00-17:30"]).unwrap();
/// assert_eq!(ranges[0].duration().num_minutes(), 510);
///
/// assert!(parse(&reference, &["0900-1730"]).is_err());
/// ```
pub fn parse<Tz: TimeZone, S: AsRef<str>>(
    reference: &DateTime<Tz>,
    values: &[S],
) -> Result<Vec<TimeRange<Tz>>> {
    parse_with_options(reference, values, &ParseOptions::default())
}

/// Parse a list of `"HH:MM-HH:MM"` intervals onto `reference`'s calendar day
/// with options.
///
/// Hours may be written with one or two digits (`"9:00"`, `"09:00"`), minutes
/// always with two. No surrounding whitespace is accepted.
///
/// # Errors
///
/// Same as [`parse`], except that inverted intervals are only an error under
/// [`InvertedPolicy::Reject`].
pub fn parse_with_options<Tz: TimeZone, S: AsRef<str>>(
    reference: &DateTime<Tz>,
    values: &[S],
    options: &ParseOptions,
) -> Result<Vec<TimeRange<Tz>>> {
    let ranges = values
        .iter()
        .map(|value| parse_interval(reference, value.as_ref(), options))
        .collect::<Result<Vec<_>>>()?;
    tracing::trace!(count = ranges.len(), "parsed intervals");
    Ok(ranges)
}

/// Place `t`'s hour and minute on `reference`'s calendar day, in
/// `reference`'s zone. Seconds and below are dropped.
///
/// Wall-clock times that fall in a DST gap are moved forward by the gap;
/// ambiguous ones resolve to the earlier instant.
pub fn normalize<Tz: TimeZone, T: Timelike>(reference: &DateTime<Tz>, t: &T) -> DateTime<Tz> {
    let clock = NaiveTime::from_hms_opt(t.hour(), t.minute(), 0).unwrap_or(NaiveTime::MIN);
    on_day(reference, reference.date_naive(), clock)
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn parse_interval<Tz: TimeZone>(
    reference: &DateTime<Tz>,
    value: &str,
    options: &ParseOptions,
) -> Result<TimeRange<Tz>> {
    let (start, end) = split_interval(value).inspect_err(|e| {
        tracing::debug!(value, error = %e, "rejecting interval");
    })?;

    let (start_at, end_at) = if start <= end {
        (normalize(reference, &start), normalize(reference, &end))
    } else {
        match options.inverted {
            InvertedPolicy::Reject => {
                tracing::debug!(value, "rejecting inverted interval");
                return Err(TimeRangeError::InvalidRange(format!(
                    "'{value}' ends before it starts"
                )));
            }
            InvertedPolicy::Swap => (normalize(reference, &end), normalize(reference, &start)),
            InvertedPolicy::Overnight => {
                let day = reference.date_naive();
                let next = day.succ_opt().ok_or_else(|| {
                    TimeRangeError::InvalidRange(format!("no calendar day after {day}"))
                })?;
                (normalize(reference, &start), on_day(reference, next, end))
            }
        }
    };

    // A start inside a DST gap moves forward and can pass its end; clamp it.
    TimeRange::new(min(start_at, end_at.clone()), end_at)
}

/// Split `"HH:MM-HH:MM"` into its two clock times.
fn split_interval(value: &str) -> Result<(NaiveTime, NaiveTime)> {
    let (start, end) = value
        .split_once('-')
        .filter(|(_, end)| !end.contains('-'))
        .ok_or_else(|| {
            TimeRangeError::MalformedInterval(format!(
                "expected exactly one '-' delimiter: '{value}'"
            ))
        })?;

    let start = parse_clock(start).ok_or_else(|| {
        TimeRangeError::MalformedInterval(format!(
            "cannot parse start time '{start}' in '{value}'"
        ))
    })?;
    let end = parse_clock(end).ok_or_else(|| {
        TimeRangeError::MalformedInterval(format!(
            "cannot parse end time '{end}' in '{value}'"
        ))
    })?;
    Ok((start, end))
}

/// Parse a 24-hour `"H:MM"` or `"HH:MM"` clock time.
fn parse_clock(s: &str) -> Option<NaiveTime> {
    let (hour, minute) = s.split_once(':')?;
    let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !(1..=2).contains(&hour.len()) || minute.len() != 2 || !digits(hour) || !digits(minute) {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

fn on_day<Tz: TimeZone>(
    reference: &DateTime<Tz>,
    day: NaiveDate,
    clock: NaiveTime,
) -> DateTime<Tz> {
    resolve_local(&reference.timezone(), &day.and_time(clock))
}

// ── Tests ───────────────────────────────────────────────────────────────────
