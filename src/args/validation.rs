use chrono_tz::Tz;

use super::types::Args;

/// # Errors
///
/// Will return `Err` if the value is not a known IANA time zone
pub fn parse_timezone(value: &str) -> Result<Tz, String> {
    value
        .parse::<Tz>()
        .map_err(|_| format!("'{value}' is not a known time zone."))
}

/// # Errors
///
/// Will return `Err` if the value is not an hour of the day
pub fn parse_hour(value: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(hour) if hour <= 23 => Ok(hour),
        _ => Err(format!("'{value}' is not an hour between 0 and 23.")),
    }
}

impl Args {
    /// # Errors
    ///
    /// Will return `Err` if the active hours are reversed or no athlete is given
    pub fn validate(&self) -> Result<(), String> {
        if self.start_hour > self.end_hour {
            return Err(format!(
                "start hour {} is after end hour {}.",
                self.start_hour, self.end_hour
            ));
        }
        if self.athlete.trim().is_empty() {
            return Err("An athlete name is required.".to_string());
        }
        Ok(())
    }
}
