use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::controller::classifier::{ScoreEvent, classify_score_change};
use crate::model::{BotState, Snapshot};

/// Hole counts at which a routine progress update is due, ascending.
pub const MILESTONES: [u32; 2] = [6, 12];

/// Highest hole count, recorded as the milestone once a round is announced finished.
const ROUND_COMPLETE_HOLE: u32 = 18;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Update {
    MissedCut,
    TeeTime,
    RoundFinish,
    ScoreAlert(ScoreEvent),
    Milestone(u32),
}

/// Renders and delivers an update. Returns `true` only once delivery is confirmed.
#[async_trait]
pub trait Announcer: Send {
    async fn announce(&mut self, update: Update, snapshot: &Snapshot) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub state: BotState,
    /// Every update handed to the announcer this run, delivered or not.
    pub attempted: Vec<Update>,
    pub delivered: Vec<Update>,
}

impl Decision {
    async fn fire(
        &mut self,
        update: Update,
        snapshot: &Snapshot,
        announcer: &mut dyn Announcer,
    ) -> bool {
        self.attempted.push(update);
        let ok = announcer.announce(update, snapshot).await;
        if ok {
            self.delivered.push(update);
        } else {
            log::warn!("{update:?} not delivered, will retry next run");
        }
        ok
    }
}

/// Compares `snapshot` against `prior` and announces whatever is newsworthy.
///
/// Categories are checked in priority order: missed cut, tee time, round finish,
/// score alert, milestone. Announced markers only move when the announcer confirms
/// delivery, so an undelivered update fires again on the next run.
pub async fn decide(
    snapshot: &Snapshot,
    prior: &BotState,
    announcer: &mut dyn Announcer,
) -> Decision {
    let mut decision = Decision {
        state: prior.clone(),
        attempted: Vec::new(),
        delivered: Vec::new(),
    };

    if snapshot.missed_cut {
        if !decision.state.missed_cut
            && decision.fire(Update::MissedCut, snapshot, announcer).await
        {
            decision.state.missed_cut = true;
        }
        decision.state.tournament = Some(snapshot.tournament.clone());
        return decision;
    }

    // Leave round/holes untouched while waiting on the tee so the round-advance
    // reset below still happens once play starts.
    if snapshot.is_tee_time_pending() {
        if decision.state.tee_time_announced_for_round != Some(snapshot.round)
            && decision.fire(Update::TeeTime, snapshot, announcer).await
        {
            decision.state.tee_time_announced_for_round = Some(snapshot.round);
        }
        decision.state.tournament = Some(snapshot.tournament.clone());
        return decision;
    }

    if decision.state.round != Some(snapshot.round) {
        decision.state.reset_round_markers();
    }

    if snapshot.is_done {
        if decision.state.round_finish_announced_for_round != Some(snapshot.round)
            && decision.fire(Update::RoundFinish, snapshot, announcer).await
        {
            decision.state.round_finish_announced_for_round = Some(snapshot.round);
            decision.state.last_milestone_hole = Some(ROUND_COMPLETE_HOLE);
        }
        decision.state.observe(snapshot);
        return decision;
    }

    if let (true, Some(hole)) = (snapshot.is_live, snapshot.holes_completed) {
        let event = classify_score_change(
            decision.state.today_score,
            snapshot.today_score,
            decision.state.holes_completed,
            snapshot.holes_completed,
        );
        let last_alert = decision.state.last_alert_hole.unwrap_or(0);
        if event.is_notable()
            && hole > last_alert
            && decision
                .fire(Update::ScoreAlert(event), snapshot, announcer)
                .await
        {
            decision.state.last_alert_hole = Some(hole);
        }

        let last_milestone = decision.state.last_milestone_hole.unwrap_or(0);
        let due = MILESTONES
            .iter()
            .copied()
            .find(|&m| hole >= m && m > last_milestone);
        if let Some(milestone) = due {
            if decision.state.last_alert_hole == Some(hole) {
                // the alert for this hole already covers it
                decision.state.last_milestone_hole = Some(milestone);
            } else if decision
                .fire(Update::Milestone(milestone), snapshot, announcer)
                .await
            {
                decision.state.last_milestone_hole = Some(milestone);
            }
        }
    }

    decision.state.observe(snapshot);
    decision
}
