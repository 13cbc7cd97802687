use serde::{Deserialize, Serialize};

use crate::model::Snapshot;

/// What has already been observed and announced for the tracked athlete.
///
/// Persisted between runs. Every field has a default, so a state file written by an
/// older build (or with keys missing) still loads. The `alias` names are the keys the
/// earlier bot wrote.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BotState {
    pub tournament: Option<String>,
    pub round: Option<u32>,
    #[serde(alias = "thru")]
    pub holes_completed: Option<u32>,
    pub today_score: Option<i32>,
    pub total_score: Option<i32>,
    pub position: Option<String>,
    pub missed_cut: bool,
    #[serde(alias = "tee_time_tweeted_round")]
    pub tee_time_announced_for_round: Option<u32>,
    #[serde(alias = "round_finish_tweeted")]
    pub round_finish_announced_for_round: Option<u32>,
    #[serde(alias = "last_hole_milestone")]
    pub last_milestone_hole: Option<u32>,
    pub last_alert_hole: Option<u32>,
}

impl BotState {
    /// Returns a fresh state when the stored tournament differs from `tournament`.
    #[must_use]
    pub fn for_tournament(self, tournament: &str) -> Self {
        match self.tournament.as_deref() {
            Some(known) if known != tournament => {
                log::info!("New tournament detected ({tournament}), resetting state");
                Self::default()
            }
            _ => self,
        }
    }

    /// Copies the observational fields that the next run diffs against.
    pub fn observe(&mut self, snapshot: &Snapshot) {
        self.tournament = Some(snapshot.tournament.clone());
        self.round = Some(snapshot.round);
        self.holes_completed = snapshot.holes_completed;
        self.today_score = snapshot.today_score;
        self.total_score = snapshot.total_score;
        self.position = Some(snapshot.position.clone());
    }

    pub(crate) fn reset_round_markers(&mut self) {
        self.last_milestone_hole = None;
        self.last_alert_hole = None;
    }
}
