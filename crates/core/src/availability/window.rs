//! Working window resolution for a single local date

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use slotwise_domain::{resolve_local, AvailabilityPolicy, TimeRange};

/// UTC window `[start, end)` the owner works on `date`, or `None` when the
/// day is disabled or the window is empty.
///
/// Start and end are resolved independently, so a window that crosses a DST
/// transition is an hour shorter or longer than its wall-clock length.
pub fn working_window(policy: &AvailabilityPolicy, tz: Tz, date: NaiveDate) -> Option<TimeRange> {
    let hours = policy.working_hours.day(date.weekday());
    if !hours.is_open() {
        return None;
    }

    let start = resolve_local(tz, date, hours.start)?;
    let end = resolve_local(tz, date, hours.end)?;
    let window = TimeRange::new(start, end);
    (!window.is_empty()).then_some(window)
}
