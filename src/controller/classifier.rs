use serde::{Deserialize, Serialize};

/// Notable in-round score swing, inferred from aggregate score movement.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreEvent {
    None,
    /// Two or more under par per hole played, e.g. an eagle.
    SharpGain,
    /// Three or more under across at most two holes.
    ShortGain,
    /// Two or more over par per hole played.
    SharpLoss,
}

impl ScoreEvent {
    #[must_use]
    pub fn is_notable(self) -> bool {
        self != Self::None
    }
}

/// Classifies the change between two observations of today's score.
///
/// There is no hole-by-hole data here, only the score before and after some number
/// of holes, so one eagle and two birdies in a row look the same.
#[must_use]
pub fn classify_score_change(
    prev_today: Option<i32>,
    new_today: Option<i32>,
    prev_holes: Option<u32>,
    new_holes: Option<u32>,
) -> ScoreEvent {
    let (Some(prev_today), Some(new_today), Some(prev_holes), Some(new_holes)) =
        (prev_today, new_today, prev_holes, new_holes)
    else {
        return ScoreEvent::None;
    };

    let holes_advanced = i64::from(new_holes) - i64::from(prev_holes);
    if holes_advanced <= 0 {
        return ScoreEvent::None;
    }

    let delta = i64::from(new_today) - i64::from(prev_today);
    let per_hole = delta as f64 / holes_advanced as f64;

    if per_hole <= -2.0 {
        ScoreEvent::SharpGain
    } else if delta <= -3 && holes_advanced <= 2 {
        ScoreEvent::ShortGain
    } else if per_hole >= 2.0 {
        ScoreEvent::SharpLoss
    } else {
        ScoreEvent::None
    }
}
