//! Wall-clock to instant resolution
//!
//! Policy times are local to the owner's timezone. A local time can map to
//! zero instants (spring-forward gap) or two (fall-back overlap), so every
//! conversion goes through [`resolve_local`].

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::constants::MAX_DST_GAP_MINUTES;

/// Resolves a local date and time in `tz` to a UTC instant.
///
/// Ambiguous times resolve to the earliest instant. Times inside a gap
/// resolve to the first valid wall-clock minute after the gap. Returns
/// `None` only if no valid time exists within two days, which no real zone
/// produces.
pub fn resolve_local(tz: Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
    resolve_naive(tz, date.and_time(time))
}

/// Start of the local calendar day as a UTC instant.
pub fn local_midnight(tz: Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    resolve_local(tz, date, NaiveTime::MIN)
}

fn resolve_naive(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => (1..=MAX_DST_GAP_MINUTES).find_map(|minutes| {
            tz.from_local_datetime(&(naive + Duration::minutes(minutes)))
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        }),
    }
}
