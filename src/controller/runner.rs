use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::BotConfig;
use crate::controller::decision::{Announcer, Decision, Update, decide};
use crate::controller::espn::{EspnApiClient, build_snapshot, find_active_event};
use crate::error::BotError;
use crate::model::Snapshot;
use crate::post::Poster;
use crate::storage::StateStore;
use crate::view::message::MessageRenderer;

#[derive(Debug)]
pub enum RunOutcome {
    OutsideActiveHours,
    /// Every fetch attempt failed; state is left as it was.
    FetchFailed(BotError),
    NoActiveEvent,
    AthleteNotFound,
    Completed(Decision),
}

/// Renders each update and hands it to the poster.
pub struct PostingAnnouncer<'a> {
    renderer: &'a mut MessageRenderer,
    poster: &'a dyn Poster,
}

impl<'a> PostingAnnouncer<'a> {
    pub fn new(renderer: &'a mut MessageRenderer, poster: &'a dyn Poster) -> Self {
        Self { renderer, poster }
    }
}

#[async_trait]
impl<'a> Announcer for PostingAnnouncer<'a> {
    async fn announce(&mut self, update: Update, snapshot: &Snapshot) -> bool {
        let text = self.renderer.render(update, snapshot);
        log::info!("Posting {update:?}: {text}");
        match self.poster.post(&text).await {
            Ok(receipt) => {
                match (receipt.id, receipt.url) {
                    (Some(id), Some(url)) => log::info!("Posted {id}: {url}"),
                    (Some(id), None) => log::info!("Posted {id}"),
                    _ => {}
                }
                true
            }
            Err(e) => {
                log::error!("Post failed: {e}");
                false
            }
        }
    }
}

/// One scheduled invocation: gate, fetch, decide, post, persist.
///
/// State is only written when the run reaches the decision engine.
///
/// # Errors
///
/// Will return `Err` if the state store cannot be read or written
pub async fn run_once(
    config: &BotConfig,
    espn: &dyn EspnApiClient,
    poster: &dyn Poster,
    store: &dyn StateStore,
    renderer: &mut MessageRenderer,
    now: DateTime<Utc>,
) -> Result<RunOutcome, BotError> {
    let local = config.active_hours.local_label(now);
    if !config.ignore_schedule && !config.active_hours.contains(now) {
        log::info!(
            "[{local}] Outside active hours ({}-{}), skipping",
            config.active_hours.start_hour,
            config.active_hours.end_hour
        );
        return Ok(RunOutcome::OutsideActiveHours);
    }

    let state = store.load()?;

    let leaderboard = match espn.get_leaderboard().await {
        Ok(json) => json,
        Err(e) => {
            log::error!("[{local}] Leaderboard unavailable: {e}");
            return Ok(RunOutcome::FetchFailed(e));
        }
    };

    let Some(event) = find_active_event(&leaderboard) else {
        log::info!("[{local}] No active event found");
        return Ok(RunOutcome::NoActiveEvent);
    };
    log::info!("[{local}] Event: {} ({})", event.name, event.status);

    let state = state.for_tournament(&event.name);

    let Some(snapshot) = build_snapshot(&leaderboard, &config.athlete, &event.name) else {
        log::warn!("{} not found on the leaderboard", config.athlete);
        return Ok(RunOutcome::AthleteNotFound);
    };

    let mut announcer = PostingAnnouncer::new(renderer, poster);
    let decision = decide(&snapshot, &state, &mut announcer).await;
    if decision.attempted.is_empty() {
        log::info!("Nothing new to report");
    }

    store.save(&decision.state)?;
    log::info!("State saved");

    Ok(RunOutcome::Completed(decision))
}
