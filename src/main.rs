use golfer_status_bot::args;
use golfer_status_bot::config::BotConfig;
use golfer_status_bot::controller::espn::ReqwestEspnClient;
use golfer_status_bot::controller::runner::{RunOutcome, run_once};
use golfer_status_bot::storage::JsonFileStateStore;
use golfer_status_bot::view::message::MessageRenderer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let args = match args::args_checks() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    let config = BotConfig::from_args(args)?;
    let store = JsonFileStateStore::new(&config.state_file);
    log::info!(
        "Tracking {} | dry run: {} | state: {}",
        config.athlete,
        config.dry_run,
        store.path().display()
    );

    let espn = ReqwestEspnClient::new(&config.leaderboard_url)?;
    let poster = config.poster()?;
    let mut renderer = match config.seed {
        Some(seed) => MessageRenderer::seeded(seed, &config.hashtags),
        None => MessageRenderer::from_entropy(&config.hashtags),
    };

    let outcome = run_once(
        &config,
        &espn,
        poster.as_ref(),
        &store,
        &mut renderer,
        chrono::Utc::now(),
    )
    .await?;

    match outcome {
        RunOutcome::Completed(decision) => {
            log::info!("Run complete, delivered {:?}", decision.delivered);
        }
        other => log::info!("Run ended early: {other:?}"),
    }
    Ok(())
}
