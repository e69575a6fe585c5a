//! Closed time ranges and their set difference.
//!
//! A [`TimeRange`] is the interval `[start, end]` between two instants with
//! `start <= end`. Construction is the only gate for that invariant: every
//! operation here derives new ranges from already-valid ones, so a range
//! that exists is a valid range.
//!
//! # Functions
//!
//! - [`TimeRange::new`] / [`TimeRange::unbound`] — validated construction
//! - [`TimeRange::sub`] — `tr - u`, yielding zero, one or two pieces
//! - [`TimeRange::sub_multi`] — `tr - u1 - u2 - ...` across every fragment
//! - [`TimeRange::free_time`] — `sub_multi` without zero-length slivers
//! - [`max`] / [`min`] — the later / earlier of two instants

use std::fmt;

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use serde::Serialize;

use crate::error::{Result, TimeRangeError};

// ── TimeRange ───────────────────────────────────────────────────────────────

/// A closed interval `[start, end]` between two instants in the same zone.
///
/// Two ranges are equal when they cover the same instants, regardless of the
/// zone they are expressed in.
#[derive(Clone, Serialize)]
#[serde(bound(serialize = "DateTime<Tz>: Serialize"))]
pub struct TimeRange<Tz: TimeZone = Utc> {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl<Tz: TimeZone> TimeRange<Tz> {
    /// Create a range from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeRangeError::InvalidRange`] if either instant is the zero
    /// time (the Unix epoch, chrono's default instant) or if `start` is after
    /// `end`. Equal instants are accepted and produce a zero-length range.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use timerange::TimeRange;
    ///
    /// let start = Utc.with_ymd_and_hms(2020, 1, 1, 9, 0, 0).unwrap();
    /// let end = Utc.with_ymd_and_hms(2020, 1, 1, 17, 30, 0).unwrap();
    /// let tr = TimeRange::new(start, end).unwrap();
    /// assert_eq!(tr.duration().num_minutes(), 510);
    ///
    /// assert!(TimeRange::new(end, start).is_err());
    /// ```
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self> {
        if is_zero(&start) {
            return Err(TimeRangeError::InvalidRange("start is zero time".to_string()));
        }
        if is_zero(&end) {
            return Err(TimeRangeError::InvalidRange("end is zero time".to_string()));
        }
        if start > end {
            return Err(TimeRangeError::InvalidRange(format!(
                "start ({start:?}) is after end ({end:?})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Create a range from `start` to 23:59 on the calendar day after `start`,
    /// in `start`'s zone.
    ///
    /// # Errors
    ///
    /// Returns [`TimeRangeError::InvalidRange`] if `start` is the zero time,
    /// or if the following calendar day cannot be represented.
    pub fn unbound(start: DateTime<Tz>) -> Result<Self> {
        let day = start.date_naive();
        let end_local = day
            .succ_opt()
            .and_then(|next| next.and_hms_opt(23, 59, 0))
            .ok_or_else(|| {
                TimeRangeError::InvalidRange(format!("no calendar day after {day}"))
            })?;
        let end = resolve_local(&start.timezone(), &end_local);
        Self::new(start, end)
    }

    /// The inclusive lower bound.
    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    /// The upper bound. Never before [`start`](Self::start).
    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    /// Elapsed time from start to end. Never negative.
    pub fn duration(&self) -> Duration {
        self.end.clone() - self.start.clone()
    }

    /// Whether the range covers no time at all (`start == end`).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `t` lies within `[start, end]`.
    pub fn contains(&self, t: &DateTime<Tz>) -> bool {
        self.start <= *t && *t <= self.end
    }

    /// Whether the two ranges share time. Ranges that only touch at a
    /// boundary instant do not overlap.
    pub fn overlaps(&self, other: &TimeRange<Tz>) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The same instants expressed in another zone.
    pub fn with_timezone<Tz2: TimeZone>(&self, tz: &Tz2) -> TimeRange<Tz2> {
        TimeRange {
            start: self.start.with_timezone(tz),
            end: self.end.with_timezone(tz),
        }
    }

    /// Subtract `u` from this range.
    ///
    /// Returns the parts of `self` not covered by `u`, in chronological order:
    ///
    /// - nothing, when `u` covers `self` entirely
    /// - one piece, when `u` clips one side (or misses `self`, in which case
    ///   the piece is `self` unchanged)
    /// - two pieces, when `u` lies strictly inside `self`
    ///
    /// Boundaries are not special-cased, so a zero-length piece can appear
    /// when `self` is itself zero-length.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use timerange::TimeRange;
    ///
    /// let at = |h, m| Utc.with_ymd_and_hms(2020, 1, 1, h, m, 0).unwrap();
    /// let day = TimeRange::new(at(9, 0), at(17, 30)).unwrap();
    /// let meeting = TimeRange::new(at(10, 0), at(17, 0)).unwrap();
    ///
    /// let free = day.sub(&meeting);
    /// assert_eq!(free.len(), 2);
    /// assert_eq!(*free[0].end(), at(10, 0));
    /// assert_eq!(*free[1].start(), at(17, 0));
    /// ```
    pub fn sub(&self, u: &TimeRange<Tz>) -> Vec<TimeRange<Tz>> {
        let mut pieces = Vec::with_capacity(2);

        // self:  |---------|
        // u:        |---------|
        if self.start < u.start {
            pieces.push(TimeRange {
                start: self.start.clone(),
                end: min(u.start.clone(), self.end.clone()),
            });
        }

        // self:     |---------|
        // u:     |---------|
        if self.end > u.end {
            pieces.push(TimeRange {
                start: max(u.end.clone(), self.start.clone()),
                end: self.end.clone(),
            });
        }

        pieces
    }

    /// Subtract every range in `us` from this range.
    ///
    /// Each exclusion is applied to every fragment left by the previous ones,
    /// so `us` may be unsorted and its ranges may overlap each other. With no
    /// exclusions the result is `[self]`.
    pub fn sub_multi(&self, us: &[TimeRange<Tz>]) -> Vec<TimeRange<Tz>> {
        let fragments = us.iter().fold(vec![self.clone()], |fragments, u| {
            fragments.iter().flat_map(|f| f.sub(u)).collect()
        });
        tracing::trace!(
            exclusions = us.len(),
            fragments = fragments.len(),
            "subtracted exclusions"
        );
        fragments
    }

    /// The free time left in this window once `busy` is removed.
    ///
    /// Same as [`sub_multi`](Self::sub_multi) but drops zero-length slivers.
    pub fn free_time(&self, busy: &[TimeRange<Tz>]) -> Vec<TimeRange<Tz>> {
        self.sub_multi(busy)
            .into_iter()
            .filter(|slot| !slot.is_empty())
            .collect()
    }
}

impl<Tz: TimeZone, Tz2: TimeZone> PartialEq<TimeRange<Tz2>> for TimeRange<Tz> {
    fn eq(&self, other: &TimeRange<Tz2>) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<Tz: TimeZone> Eq for TimeRange<Tz> {}

impl<Tz: TimeZone> fmt::Debug for TimeRange<Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeRange")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl<Tz: TimeZone> fmt::Display for TimeRange<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

// ── max / min ───────────────────────────────────────────────────────────────

/// The later of two instants. Returns `u` when they are equal.
pub fn max<Tz: TimeZone>(t: DateTime<Tz>, u: DateTime<Tz>) -> DateTime<Tz> {
    if t > u {
        t
    } else {
        u
    }
}

/// The earlier of two instants. Returns `u` when they are equal.
pub fn min<Tz: TimeZone>(t: DateTime<Tz>, u: DateTime<Tz>) -> DateTime<Tz> {
    if t < u {
        t
    } else {
        u
    }
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Whether `t` is chrono's default instant, which stands in for "unset".
fn is_zero<Tz: TimeZone>(t: &DateTime<Tz>) -> bool {
    t.timestamp() == 0 && t.timestamp_subsec_nanos() == 0
}

/// Place a wall-clock datetime in `tz`, total across DST transitions.
///
/// Ambiguous times take the earlier instant. Times inside a gap are read with
/// the offset in force before the gap, which moves them forward by its length.
pub(crate) fn resolve_local<Tz: TimeZone>(tz: &Tz, local: &NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let probe = local.checked_sub_signed(Duration::days(1)).unwrap_or(*local);
            let before = tz.offset_from_utc_datetime(&probe).fix();
            let utc = local
                .checked_sub_signed(Duration::seconds(i64::from(before.local_minus_utc())))
                .unwrap_or(*local);
            tz.from_utc_datetime(&utc)
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
