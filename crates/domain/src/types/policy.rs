//! Availability policy types
//!
//! One policy per owner: a weekly working-hours template interpreted in the
//! owner's timezone, plus the buffer and daily cap rules.

use chrono::{Duration, NaiveTime, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_TIMEZONE, DEFAULT_WORKDAY_END_HOUR, DEFAULT_WORKDAY_START_HOUR, MAX_BUFFER_MINUTES,
};
use crate::errors::PolicyError;

/// Working hours for a single weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub enabled: bool,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl DayHours {
    pub fn open(start: NaiveTime, end: NaiveTime) -> Self {
        Self { enabled: true, start, end }
    }

    pub fn closed() -> Self {
        Self { enabled: false, start: NaiveTime::MIN, end: NaiveTime::MIN }
    }

    /// Enabled with a non-empty window.
    pub fn is_open(&self) -> bool {
        self.enabled && self.start < self.end
    }
}

fn default_open_day() -> DayHours {
    let start = NaiveTime::from_hms_opt(DEFAULT_WORKDAY_START_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    let end = NaiveTime::from_hms_opt(DEFAULT_WORKDAY_END_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    DayHours::open(start, end)
}

/// Weekly working-hours template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl WeeklyHours {
    /// Every day closed.
    pub fn closed() -> Self {
        let closed = DayHours::closed();
        Self {
            monday: closed,
            tuesday: closed,
            wednesday: closed,
            thursday: closed,
            friday: closed,
            saturday: closed,
            sunday: closed,
        }
    }

    /// Monday through Friday open with the same hours, weekend closed.
    pub fn weekdays(start: NaiveTime, end: NaiveTime) -> Self {
        let open = DayHours::open(start, end);
        Self {
            monday: open,
            tuesday: open,
            wednesday: open,
            thursday: open,
            friday: open,
            ..Self::closed()
        }
    }

    pub fn day(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, weekday: Weekday) -> &mut DayHours {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    /// Days in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayHours)> + '_ {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .map(move |weekday| (weekday, self.day(weekday)))
    }
}

impl Default for WeeklyHours {
    fn default() -> Self {
        let open = default_open_day();
        Self::weekdays(open.start, open.end)
    }
}

/// Maximum number of confirmed events per local day.
///
/// Serialized as `null` for unlimited and a number otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum DailyCap {
    #[default]
    Unlimited,
    Max(u32),
}

impl DailyCap {
    /// True once `confirmed` events already fill the day.
    pub fn is_reached(&self, confirmed: u32) -> bool {
        match self {
            Self::Unlimited => false,
            Self::Max(max) => confirmed >= *max,
        }
    }
}

impl From<Option<u32>> for DailyCap {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Self::Unlimited, Self::Max)
    }
}

impl From<DailyCap> for Option<u32> {
    fn from(cap: DailyCap) -> Self {
        match cap {
            DailyCap::Unlimited => None,
            DailyCap::Max(max) => Some(max),
        }
    }
}

/// Per-owner availability policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityPolicy {
    pub working_hours: WeeklyHours,
    /// IANA zone identifier; every policy time is wall-clock in this zone.
    pub timezone: String,
    pub buffer_minutes: u32,
    pub max_events_per_day: DailyCap,
}

impl AvailabilityPolicy {
    pub fn tz(&self) -> Result<Tz, PolicyError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| PolicyError::UnknownTimezone(self.timezone.clone()))
    }

    pub fn buffer(&self) -> Duration {
        Duration::minutes(i64::from(self.buffer_minutes))
    }

    /// Checks the write-time invariants. Disabled days may carry any times.
    pub fn validate(&self) -> Result<(), PolicyError> {
        for (weekday, hours) in self.working_hours.iter() {
            if hours.enabled && hours.start >= hours.end {
                return Err(PolicyError::InvalidWindow {
                    day: weekday.to_string(),
                    start: hours.start.to_string(),
                    end: hours.end.to_string(),
                });
            }
        }

        self.tz()?;

        if self.buffer_minutes > MAX_BUFFER_MINUTES {
            return Err(PolicyError::BufferTooLarge {
                minutes: self.buffer_minutes,
                max: MAX_BUFFER_MINUTES,
            });
        }

        Ok(())
    }
}

impl Default for AvailabilityPolicy {
    fn default() -> Self {
        Self {
            working_hours: WeeklyHours::default(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            buffer_minutes: 0,
            max_events_per_day: DailyCap::Unlimited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn default_policy_is_valid() {
        let policy = AvailabilityPolicy::default();
        assert!(policy.validate().is_ok());
        assert!(policy.working_hours.monday.is_open());
        assert!(!policy.working_hours.sunday.is_open());
    }

    #[test]
    fn enabled_day_with_inverted_window_is_rejected() {
        let mut policy = AvailabilityPolicy::default();
        *policy.working_hours.day_mut(Weekday::Wed) = DayHours::open(hm(17, 0), hm(9, 0));

        let err = policy.validate().unwrap_err();
        assert_eq!(
            err,
            PolicyError::InvalidWindow {
                day: "Wed".into(),
                start: "17:00:00".into(),
                end: "09:00:00".into(),
            }
        );
    }

    #[test]
    fn zero_length_enabled_window_is_rejected() {
        let mut policy = AvailabilityPolicy::default();
        policy.working_hours.friday = DayHours::open(hm(9, 0), hm(9, 0));
        assert!(matches!(policy.validate(), Err(PolicyError::InvalidWindow { .. })));
    }

    #[test]
    fn disabled_day_may_hold_any_times() {
        let mut policy = AvailabilityPolicy::default();
        policy.working_hours.saturday =
            DayHours { enabled: false, start: hm(18, 0), end: hm(8, 0) };
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let policy = AvailabilityPolicy { timezone: "Mars/Olympus".into(), ..Default::default() };
        assert_eq!(policy.validate(), Err(PolicyError::UnknownTimezone("Mars/Olympus".into())));
    }

    #[test]
    fn oversized_buffer_is_rejected() {
        let policy = AvailabilityPolicy { buffer_minutes: 24 * 60 + 1, ..Default::default() };
        assert!(matches!(policy.validate(), Err(PolicyError::BufferTooLarge { .. })));
    }

    #[test]
    fn daily_cap_serializes_as_nullable_number() {
        assert_eq!(serde_json::to_string(&DailyCap::Unlimited).unwrap(), "null");
        assert_eq!(serde_json::to_string(&DailyCap::Max(3)).unwrap(), "3");
        assert_eq!(serde_json::from_str::<DailyCap>("0").unwrap(), DailyCap::Max(0));
    }

    #[test]
    fn daily_cap_zero_blocks_every_day() {
        assert!(DailyCap::Max(0).is_reached(0));
        assert!(!DailyCap::Max(2).is_reached(1));
        assert!(DailyCap::Max(2).is_reached(2));
        assert!(!DailyCap::Unlimited.is_reached(u32::MAX));
    }
}
