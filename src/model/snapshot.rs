use serde::{Deserialize, Serialize};

/// The tracked athlete's status for a single run, normalized from the leaderboard.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub athlete: String,
    pub tournament: String,
    pub round: u32,
    /// `None` until the athlete tees off; 18 once the round is finished.
    pub holes_completed: Option<u32>,
    pub is_live: bool,
    pub is_done: bool,
    pub today_score: Option<i32>,
    pub total_score: Option<i32>,
    /// Empty when the leaderboard has no usable position.
    pub position: String,
    pub tee_time: String,
    pub missed_cut: bool,
}

impl Snapshot {
    /// A tee time is only worth announcing when it carries an actual time.
    #[must_use]
    pub fn has_tee_time(&self) -> bool {
        self.tee_time.chars().any(|c| c.is_ascii_digit())
    }

    /// Teed-up but not started: a tee time is showing and no holes are in progress.
    #[must_use]
    pub fn is_tee_time_pending(&self) -> bool {
        self.has_tee_time() && !self.is_live && !self.is_done
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ActiveEvent {
    pub name: String,
    pub status: String,
}
