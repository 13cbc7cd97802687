use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;
pub const DEFAULT_START_HOUR: u32 = 6;
pub const DEFAULT_END_HOUR: u32 = 22;

/// Wall-clock window, inclusive on both ends, in which a run is allowed to do anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveHours {
    pub timezone: Tz,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for ActiveHours {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
        }
    }
}

impl ActiveHours {
    #[must_use]
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        let hour = now.with_timezone(&self.timezone).hour();
        (self.start_hour..=self.end_hour).contains(&hour)
    }

    #[must_use]
    pub fn local_label(&self, now: DateTime<Utc>) -> String {
        now.with_timezone(&self.timezone)
            .format("%Y-%m-%d %H:%M %Z")
            .to_string()
    }
}
