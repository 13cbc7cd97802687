use regex::Regex;
use std::sync::LazyLock;

/// Placeholders the leaderboard uses for an even-par (or not yet posted) score.
const EVEN_MARKERS: [&str; 5] = ["E", "Even", "EVEN", "--", ""];

// Tie marker, then the rank, then an optional ordinal suffix.
static RANK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^T?-?(\d+)(?:st|nd|rd|th)?$").expect("rank regex is valid")
});

/// Converts a leaderboard score string into a signed value relative to par.
///
/// `"E"`, `"Even"`, `"--"` and the empty string are even par. `"+3"` is 3 and
/// `"-2"` is -2. Anything else is `None`.
#[must_use]
pub fn parse_score(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if EVEN_MARKERS.contains(&s) {
        return Some(0);
    }
    s.trim_start_matches('+').parse::<i32>().ok()
}

/// Renders a score for display: `None` and 0 are `"E"`, positives get a `+`.
#[must_use]
pub fn format_score(score: Option<i32>) -> String {
    match score {
        None | Some(0) => "E".to_string(),
        Some(n) if n > 0 => format!("+{n}"),
        Some(n) => n.to_string(),
    }
}

/// `"T5"` is 5, `"1st"` is 1, `"T-12"` is 12. Only used to pick a tone.
#[must_use]
pub fn parse_position_rank(pos: &str) -> Option<u32> {
    RANK.captures(pos.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}
