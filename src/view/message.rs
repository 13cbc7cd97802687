use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::controller::classifier::ScoreEvent;
use crate::controller::decision::Update;
use crate::model::{Snapshot, format_score, parse_position_rank};

/// Longest text the posting endpoint accepts.
pub const MAX_MESSAGE_CHARS: usize = 280;

pub const DEFAULT_HASHTAGS: &str = "#PGATour #Golf";

const NEUTRAL_FLAVOR: &str = "Working! 💪";

const LEADER_FLAVORS: &[&str] = &[
    "👑 Top of the leaderboard!",
    "🔥 Sitting in FIRST!",
    "⛳ Number 1 baby!",
    "🏆 Leading the way!",
];
const PODIUM_FLAVORS: &[&str] = &[
    "🔥 Right in the mix!",
    "💪 Inside the top 3!",
    "🎯 Podium territory!",
];
const TOP_FIVE_FLAVORS: &[&str] = &[
    "🔥 Top 5 and hunting!",
    "⚡ Charging up the board!",
    "💼 Top 5, big things loading…",
];
const TOP_TEN_FLAVORS: &[&str] = &[
    "📈 Top 10 and climbing!",
    "💪 Hanging in the top 10!",
    "⛳ Well positioned!",
];
const TOP_TWENTY_FLAVORS: &[&str] = &[
    "⚙️ Grinding into contention!",
    "📊 Plenty of golf left!",
    "💼 Room to move!",
];
const FIELD_FLAVORS: &[&str] = &[
    "🔨 Never stop grinding!",
    "💪 Keep building!",
    "⛳ Stay patient, lots left!",
];

/// Phrase pool for a leaderboard rank; unknown ranks get the neutral phrase.
#[must_use]
pub fn position_flavors(rank: Option<u32>) -> &'static [&'static str] {
    match rank {
        None => &[NEUTRAL_FLAVOR],
        Some(1) => LEADER_FLAVORS,
        Some(2..=3) => PODIUM_FLAVORS,
        Some(4..=5) => TOP_FIVE_FLAVORS,
        Some(6..=10) => TOP_TEN_FLAVORS,
        Some(11..=20) => TOP_TWENTY_FLAVORS,
        Some(_) => FIELD_FLAVORS,
    }
}

/// Closing line for a finished round, keyed off the round's score.
#[must_use]
pub fn round_finish_coda(today: Option<i32>) -> &'static str {
    match today.unwrap_or(0) {
        i32::MIN..=-6 => "🔥🔥 WHAT A ROUND!",
        -5..=-4 => "🔥 Absolutely firing!",
        -3..=-2 => "✅ Solid round of golf.",
        0 => "Steady day. Let's build.",
        -1 | 1..=2 => "Grind continues. Heads up. 💪",
        _ => "Tough day, reset and go. 🔨",
    }
}

/// Cuts `text` to at most `max` characters.
#[must_use]
pub fn truncate_message(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Turns an update into post text, picking among phrasings at random.
///
/// The random source is owned here so a seeded renderer gives repeatable output.
pub struct MessageRenderer<R: Rng = StdRng> {
    rng: R,
    hashtags: String,
}

impl MessageRenderer<StdRng> {
    #[must_use]
    pub fn from_entropy(hashtags: impl Into<String>) -> Self {
        Self::new(StdRng::from_entropy(), hashtags)
    }

    #[must_use]
    pub fn seeded(seed: u64, hashtags: impl Into<String>) -> Self {
        Self::new(StdRng::seed_from_u64(seed), hashtags)
    }
}

impl<R: Rng> MessageRenderer<R> {
    pub fn new(rng: R, hashtags: impl Into<String>) -> Self {
        Self {
            rng,
            hashtags: hashtags.into(),
        }
    }

    /// Renders `update` for `snapshot`, hashtags appended, cut to the post limit.
    pub fn render(&mut self, update: Update, snapshot: &Snapshot) -> String {
        let flavor = self.pick(position_flavors(parse_position_rank(&snapshot.position)));
        let variants = match update {
            Update::MissedCut => missed_cut_variants(snapshot),
            Update::TeeTime => tee_time_variants(snapshot, flavor),
            Update::RoundFinish => round_finish_variants(snapshot),
            Update::ScoreAlert(event) => score_alert_variants(snapshot, event),
            Update::Milestone(_) => milestone_variants(snapshot, flavor),
        };
        let body = self.pick(&variants).trim_end().to_string();
        let text = if self.hashtags.trim().is_empty() {
            body
        } else {
            format!("{body} {}", self.hashtags.trim())
        };
        truncate_message(&text, MAX_MESSAGE_CHARS)
    }

    fn pick<'a, S: AsRef<str>>(&mut self, options: &'a [S]) -> &'a str {
        options
            .choose(&mut self.rng)
            .map_or("", |s| s.as_ref())
    }
}

fn missed_cut_variants(s: &Snapshot) -> Vec<String> {
    let (name, t, total) = (&s.athlete, &s.tournament, format_score(s.total_score));
    vec![
        format!(
            "⛳ {name} misses the cut at the {t} ({total}). Regroup and reload, next one is right around the corner. 💪"
        ),
        format!("No weekend for {name} at the {t} after finishing at {total}. Head up, grind never stops. 🔨"),
        format!("Cut line gets us at the {t} ({total}). We'll be back. {name} next week! ⛳"),
        format!("{name}'s week ends at the {t} ({total}). Reset, refocus, reload. Bigger things ahead. 💪"),
    ]
}

fn tee_time_variants(s: &Snapshot, flavor: &str) -> Vec<String> {
    let (name, t, tt, rd) = (&s.athlete, &s.tournament, &s.tee_time, s.round);
    let total = format_score(s.total_score);
    let pos = &s.position;

    if rd == 1 {
        vec![
            format!("⛳ {name} tees off at {tt} for Round 1 of the {t}. Let's get it!"),
            format!("🏌️ It's go time. {name} starts R1 at {tt} at the {t}."),
            format!("📍 {tt} tee time for {name}, Round 1 of the {t}. Game on!"),
        ]
    } else if !pos.is_empty() {
        vec![
            format!("⏰ Round {rd} tee time: {tt}. {name} {pos} ({total}) at the {t}. {flavor}"),
            format!("⛳ {name} off at {tt} in R{rd}. Sitting {pos} at {total} at the {t}. {flavor}"),
            format!("🏌️ {tt} start for R{rd}. {name} {pos}, {total} overall at the {t}."),
            format!("📍 R{rd} tee time locked in: {tt}. {name} {pos} ({total}) at the {t}."),
        ]
    } else {
        vec![
            format!("⛳ Round {rd} tee time: {tt} for {name} at the {t}. Currently {total}."),
            format!("🏌️ {name} tees off at {tt} in R{rd} of the {t}. Sitting at {total}."),
        ]
    }
}

fn score_alert_variants(s: &Snapshot, event: ScoreEvent) -> Vec<String> {
    let (name, t) = (&s.athlete, &s.tournament);
    let hole = s.holes_completed.unwrap_or(0);
    let today = format_score(s.today_score);
    let total = format_score(s.total_score);
    let pos = if s.position.is_empty() {
        "the field"
    } else {
        s.position.as_str()
    };

    match event {
        ScoreEvent::SharpGain => vec![
            format!("🦅 EAGLE! {name} makes eagle at hole {hole}! {today} today, {total} overall. {pos} at the {t}."),
            format!("💥 EAGLE on #{hole}! {name} goes {today} today and sits at {total} total. {pos}. {t}"),
            format!("🦅 {name} EAGLES hole {hole}! Moves to {today} today / {total} overall. {pos} at the {t}."),
        ],
        ScoreEvent::ShortGain => vec![
            format!("🔥 Birdie run! {name} on fire, {today} today through {hole}, {total} overall. {pos} at the {t}."),
            format!("🐦🐦 {name} is ROLLING. {today} through {hole} holes today, {total} total. {pos}. {t}"),
            format!("⚡ Can't miss right now! {name} {today} today thru {hole} ({total} overall). {pos} at the {t}."),
        ],
        ScoreEvent::SharpLoss | ScoreEvent::None => vec![
            format!("😤 Tough hole for {name} at #{hole}. Still hanging in at {today} today, {total} overall. {pos} at the {t}."),
            format!("💪 Adversity on #{hole}. {name} {today} today, {total} total. {pos}. Plenty of golf left. {t}"),
            format!("⛳ Rough patch at #{hole}, but {name} keeps fighting. {today} today / {total} overall. {pos} at the {t}."),
        ],
    }
}

fn milestone_variants(s: &Snapshot, flavor: &str) -> Vec<String> {
    let (name, t, rd) = (&s.athlete, &s.tournament, s.round);
    let hole = s.holes_completed.unwrap_or(0);
    let today = format_score(s.today_score);
    let total = format_score(s.total_score);
    let pos_tag = if s.position.is_empty() {
        String::new()
    } else {
        format!("{} ", s.position)
    };

    vec![
        format!("📊 Thru {hole} | R{rd}: {name} {today} today, {total} overall. {pos_tag}at the {t}. {flavor}"),
        format!("⛳ Through {hole} holes (R{rd}): {name} {today} today / {total} total. {pos_tag}{t}."),
        format!("🔄 R{rd} check-in, hole {hole}: {today} today | {total} overall | {pos_tag}{t}. {flavor}"),
        format!("📍 {t} R{rd} | Thru {hole} | {name} {today} today, {total} total. {pos_tag}"),
        format!("🏌️ Hole {hole} update: {name} {today} today, {total} overall. {pos_tag}at the {t} R{rd}."),
    ]
}

fn round_finish_variants(s: &Snapshot) -> Vec<String> {
    let (name, t, rd) = (&s.athlete, &s.tournament, s.round);
    let today = format_score(s.today_score);
    let total = format_score(s.total_score);
    let coda = round_finish_coda(s.today_score);
    let pos_tag = if s.position.is_empty() {
        String::new()
    } else {
        format!("{} ", s.position)
    };

    vec![
        format!("🏁 Round {rd} DONE. {name} cards {today} today. {pos_tag}{total} overall at the {t}. {coda}"),
        format!("✅ R{rd} in the books. {name}: {today} today | {total} total | {pos_tag}{t}. {coda}"),
        format!("📋 R{rd} wrap: {name} shoots {today}. Moves to {total} overall. {pos_tag}{t}. {coda}"),
        format!("⛳ {name} posts {today} in Round {rd}. {total} overall, {pos_tag}at the {t}. {coda}"),
    ]
}
