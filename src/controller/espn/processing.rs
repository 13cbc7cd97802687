use serde_json::Value;

use crate::model::{ActiveEvent, Snapshot, parse_score};

/// Tokens the leaderboard uses in place of a position once a player is out.
pub const CUT_SIGNALS: [&str; 6] = ["CUT", "MC", "WD", "DQ", "RTD", "MDF"];

const FINISHED_THRU: &str = "F";
const HOLES_PER_ROUND: u32 = 18;

fn is_cut_signal(value: &str) -> bool {
    let upper = value.trim().to_uppercase();
    CUT_SIGNALS.contains(&upper.as_str())
}

/// Reads a field the feed sends either as a string or as a bare number.
fn str_or_number(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn events(data: &Value) -> Vec<&Value> {
    match data.get("events").and_then(Value::as_array) {
        Some(events) => events.iter().collect(),
        None => vec![data],
    }
}

/// Picks the tournament currently on the leaderboard.
///
/// Returns `None` when there is no event, or the event lists no competitors yet.
#[must_use]
pub fn find_active_event(data: &Value) -> Option<ActiveEvent> {
    let event = *events(data).first()?;

    let has_competitors = event
        .get("competitions")
        .and_then(Value::as_array)
        .and_then(|comps| comps.first())
        .and_then(|comp| comp.get("competitors"))
        .and_then(Value::as_array)
        .is_some_and(|c| !c.is_empty());
    if !has_competitors {
        return None;
    }

    let name = event
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("the tournament")
        .to_string();

    // status is an object on the leaderboard endpoint, a plain string on some others
    let status = match event.get("status") {
        Some(Value::String(s)) => s.clone(),
        Some(obj) => obj
            .get("type")
            .and_then(|t| t.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
        None => "unknown".to_string(),
    };

    Some(ActiveEvent { name, status })
}

#[must_use]
pub fn collect_competitors(data: &Value) -> Vec<&Value> {
    let mut competitors = Vec::new();
    for event in events(data) {
        let comps = event
            .get("competitions")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for comp in comps {
            if let Some(list) = comp.get("competitors").and_then(Value::as_array) {
                competitors.extend(list.iter());
            }
        }
    }
    competitors
}

fn display_name(competitor: &Value) -> &str {
    let athlete = competitor.get("athlete");
    let display = athlete
        .and_then(|a| a.get("displayName"))
        .and_then(Value::as_str)
        .unwrap_or("");
    if display.is_empty() {
        athlete
            .and_then(|a| a.get("fullName"))
            .and_then(Value::as_str)
            .unwrap_or("")
    } else {
        display
    }
}

/// Hole progress: `(holes_completed, is_live, is_done)`.
#[must_use]
pub fn parse_thru(thru: &str) -> (Option<u32>, bool, bool) {
    if thru.eq_ignore_ascii_case(FINISHED_THRU) {
        return (Some(HOLES_PER_ROUND), false, true);
    }
    if thru.is_empty() || !thru.bytes().all(|b| b.is_ascii_digit()) {
        return (None, false, false);
    }
    match thru.parse::<u32>() {
        Ok(holes) => {
            let is_done = holes == HOLES_PER_ROUND;
            let is_live = holes > 0 && holes < HOLES_PER_ROUND;
            (Some(holes), is_live, is_done)
        }
        Err(_) => (None, false, false),
    }
}

/// Normalizes one competitor record into a [`Snapshot`].
#[must_use]
pub fn snapshot_from_competitor(competitor: &Value, tournament: &str) -> Snapshot {
    let score = competitor.get("score");
    let total_raw = score
        .and_then(|s| s.get("displayValue"))
        .or(score)
        .and_then(Value::as_str);
    let total_score = total_raw.and_then(parse_score);

    let raw_position = competitor
        .get("position")
        .and_then(|p| p.get("displayName"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string();

    let status = competitor.get("status");
    let thru = str_or_number(status.and_then(|s| s.get("thru")));
    let round = str_or_number(status.and_then(|s| s.get("period")))
        .parse::<u32>()
        .unwrap_or(1)
        .max(1);
    let tee_time = status
        .and_then(|s| s.get("displayValue"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let status_type = match status.and_then(|s| s.get("type")) {
        Some(Value::String(s)) => s.to_lowercase(),
        Some(obj) => obj
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_lowercase(),
        None => String::new(),
    };

    let missed_cut =
        status_type.contains("cut") || is_cut_signal(&raw_position) || is_cut_signal(&tee_time);

    // don't let "CUT" end up in a message as if it were a position
    let position = if is_cut_signal(&raw_position) {
        String::new()
    } else {
        raw_position
    };

    let (holes_completed, is_live, is_done) = parse_thru(&thru);

    let today_score = competitor
        .get("linescores")
        .and_then(Value::as_array)
        .and_then(|rounds| rounds.get(round as usize - 1))
        .and_then(|r| r.get("displayValue"))
        .and_then(Value::as_str)
        .and_then(parse_score);

    Snapshot {
        athlete: display_name(competitor).to_string(),
        tournament: tournament.to_string(),
        round,
        holes_completed,
        is_live,
        is_done,
        today_score,
        total_score,
        position,
        tee_time,
        missed_cut,
    }
}

/// Finds `athlete` on the leaderboard (case-insensitive substring on the display
/// name) and normalizes the record.
///
/// `None` means the athlete is not in the field; that is a normal outcome, not a
/// fetch failure.
#[must_use]
pub fn build_snapshot(data: &Value, athlete: &str, tournament: &str) -> Option<Snapshot> {
    let wanted = athlete.to_lowercase();
    let competitors = collect_competitors(data);
    if competitors.is_empty() {
        log::warn!("Leaderboard returned no competitors");
        return None;
    }

    let found = competitors
        .into_iter()
        .find(|c| display_name(c).to_lowercase().contains(&wanted))?;

    let snapshot = snapshot_from_competitor(found, tournament);
    log::debug!("Player data: {snapshot:?}");
    Some(snapshot)
}
