//! IANA timezone resolution and local/UTC conversions.
//!
//! This is the only place that talks to the timezone database (`chrono-tz`).
//! Everything else works with [`Tz`] values and the helpers below.

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::error::{PhaseError, PhaseResult};

/// Timezone used when a caller does not name one.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Resolve an IANA timezone name such as `"Australia/Brisbane"`.
pub fn resolve_timezone(name: &str) -> PhaseResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| PhaseError::UnknownTimezone(name.to_string()))
}

/// Local noon, the representative time of a calendar date.
const NOON: NaiveTime = match NaiveTime::from_hms_opt(12, 0, 0) {
    Some(time) => time,
    None => panic!("noon is a valid time"),
};

/// Step used to walk out of a DST gap. Every real-world gap ends on a quarter hour.
const GAP_STEP_MINUTES: i64 = 15;

/// Enough steps to cross a whole skipped day.
const MAX_GAP_STEPS: usize = 96;

/// Convert a local wall-clock time to UTC.
///
/// Ambiguous times (clocks going back) take the earlier instant. Times inside
/// a DST gap are moved forward in quarter-hour steps to the first reading that
/// exists, which is the instant the gap closes.
pub fn local_to_utc(date: NaiveDate, time: NaiveTime, tz: &Tz) -> DateTime<Utc> {
    let requested = NaiveDateTime::new(date, time);
    let mut local = requested;

    for _ in 0..MAX_GAP_STEPS {
        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => return dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
            LocalResult::None => local += Duration::minutes(GAP_STEP_MINUTES),
        }
    }

    log::warn!(
        "Local time {} does not exist in {}, using the offset in effect",
        requested,
        tz.name()
    );
    let offset = tz.offset_from_utc_datetime(&requested).fix();
    (requested - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc()
}

/// Representative instant for a local date: noon on that day.
pub fn local_noon_utc(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    local_to_utc(date, NOON, tz)
}

/// First instant whose local calendar date is `date`.
pub fn local_day_start(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    local_to_utc(date, NaiveTime::MIN, tz)
}

/// Calendar date of `instant` on the local wall clock of `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// UTC instants bounding every moment whose local date lies in `start..=end`.
///
/// The upper bound is the second before the following local midnight, so a
/// day that repeats its last hour when clocks go back keeps both passes.
pub fn local_day_bounds(start: NaiveDate, end: NaiveDate, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let first = local_day_start(start, tz);
    let last = match end.succ_opt() {
        Some(next) => local_day_start(next, tz) - Duration::seconds(1),
        None => DateTime::<Utc>::MAX_UTC,
    };
    (first, last)
}
