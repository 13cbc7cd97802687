use chrono_tz::Tz;
use clap::Parser;
use std::path::PathBuf;

use crate::controller::espn::DEFAULT_LEADERBOARD_URL;
use crate::storage::DEFAULT_STATE_FILE;
use crate::view::message::DEFAULT_HASHTAGS;

pub const DEFAULT_ATHLETE: &str = "Neal Shipley";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Athlete to track, matched case-insensitively against leaderboard names.
    #[arg(short = 'a', long, value_name = "NAME", default_value = DEFAULT_ATHLETE)]
    pub athlete: String,
    /// Where announced-update markers are kept between runs.
    #[arg(short = 's', long, value_name = "STATE_FILE", default_value = DEFAULT_STATE_FILE)]
    pub state_file: PathBuf,
    #[arg(long, value_name = "URL", default_value = DEFAULT_LEADERBOARD_URL)]
    pub leaderboard_url: String,
    /// IANA time zone the active hours are expressed in.
    #[arg(
        long,
        value_name = "TIMEZONE",
        default_value = "America/New_York",
        value_parser = crate::args::validation::parse_timezone
    )]
    pub timezone: Tz,
    #[arg(
        long,
        value_name = "HOUR",
        default_value = "6",
        value_parser = crate::args::validation::parse_hour
    )]
    pub start_hour: u32,
    #[arg(
        long,
        value_name = "HOUR",
        default_value = "22",
        value_parser = crate::args::validation::parse_hour
    )]
    pub end_hour: u32,
    /// Appended to every post. Pass an empty string for none.
    #[arg(long, value_name = "HASHTAGS", default_value = DEFAULT_HASHTAGS)]
    pub hashtags: String,
    /// Log posts instead of sending them. TEST_MODE=true in the environment does the same.
    #[arg(long)]
    pub dry_run: bool,
    /// Run even outside the active hours.
    #[arg(long)]
    pub ignore_schedule: bool,
    /// Seed for message variant selection, for repeatable output.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}
