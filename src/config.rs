use std::fmt;
use std::path::PathBuf;

use crate::args::Args;
use crate::controller::schedule::ActiveHours;
use crate::error::BotError;
use crate::post::{
    DEFAULT_TOKEN_FILE, DEFAULT_X_API_URL, DEFAULT_X_TOKEN_URL, DryRunPoster, Poster, TokenRefresh,
    XPoster, XTokens, load_tokens,
};

/// Everything a run needs, resolved once at startup.
#[derive(Clone)]
pub struct BotConfig {
    pub athlete: String,
    pub state_file: PathBuf,
    pub leaderboard_url: String,
    pub active_hours: ActiveHours,
    pub ignore_schedule: bool,
    pub hashtags: String,
    pub seed: Option<u64>,
    pub dry_run: bool,
    pub x_api_url: String,
    pub x_access_token: Option<String>,
    pub x_refresh_token: Option<String>,
    pub x_client_id: Option<String>,
    pub x_client_secret: Option<String>,
    pub x_token_url: String,
    /// Rotated token pair, kept alongside the state file.
    pub x_token_file: PathBuf,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("athlete", &self.athlete)
            .field("state_file", &self.state_file)
            .field("leaderboard_url", &self.leaderboard_url)
            .field("active_hours", &self.active_hours)
            .field("ignore_schedule", &self.ignore_schedule)
            .field("hashtags", &self.hashtags)
            .field("seed", &self.seed)
            .field("dry_run", &self.dry_run)
            .field("x_api_url", &self.x_api_url)
            .field("x_access_token", &self.x_access_token.as_ref().map(|_| "<redacted>"))
            .field("x_refresh_token", &self.x_refresh_token.as_ref().map(|_| "<redacted>"))
            .field("x_client_id", &self.x_client_id)
            .field("x_client_secret", &self.x_client_secret.as_ref().map(|_| "<redacted>"))
            .field("x_token_url", &self.x_token_url)
            .field("x_token_file", &self.x_token_file)
            .finish()
    }
}

impl BotConfig {
    /// Combines the command line with `.env` and process environment variables.
    ///
    /// Read from the environment:
    /// - `X_ACCESS_TOKEN` and/or `X_REFRESH_TOKEN` (one is required unless running dry)
    /// - `X_CLIENT_ID` (required with a refresh token), `X_CLIENT_SECRET` (confidential clients)
    /// - `X_API_URL`, `X_TOKEN_URL` (default to the X API v2 endpoints)
    /// - `TEST_MODE` (`true` forces a dry run)
    ///
    /// # Errors
    /// Returns an error if posting is enabled but the credentials are incomplete.
    pub fn from_args(args: Args) -> Result<Self, BotError> {
        dotenvy::dotenv().ok();
        Self::from_args_with_env(args, |key| std::env::var(key).ok())
    }

    /// Same as [`BotConfig::from_args`], reading variables through `env`.
    ///
    /// # Errors
    /// Returns an error if posting is enabled but the credentials are incomplete.
    pub fn from_args_with_env<F>(args: Args, env: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let test_mode = env("TEST_MODE").is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));
        let dry_run = args.dry_run || test_mode;

        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let x_access_token = non_empty("X_ACCESS_TOKEN");
        let x_refresh_token = non_empty("X_REFRESH_TOKEN");
        let x_client_id = non_empty("X_CLIENT_ID");
        if !dry_run {
            if x_access_token.is_none() && x_refresh_token.is_none() {
                return Err(BotError::Config(
                    "missing X_ACCESS_TOKEN (or run with --dry-run / TEST_MODE=true)".to_string(),
                ));
            }
            if x_refresh_token.is_some() && x_client_id.is_none() {
                return Err(BotError::Config(
                    "X_REFRESH_TOKEN is set but X_CLIENT_ID is missing".to_string(),
                ));
            }
        }

        let x_api_url = env("X_API_URL").unwrap_or_else(|| DEFAULT_X_API_URL.to_string());
        let x_token_url = env("X_TOKEN_URL").unwrap_or_else(|| DEFAULT_X_TOKEN_URL.to_string());
        let x_token_file = args.state_file.with_file_name(DEFAULT_TOKEN_FILE);

        Ok(Self {
            athlete: args.athlete,
            state_file: args.state_file,
            leaderboard_url: args.leaderboard_url,
            active_hours: ActiveHours {
                timezone: args.timezone,
                start_hour: args.start_hour,
                end_hour: args.end_hour,
            },
            ignore_schedule: args.ignore_schedule,
            hashtags: args.hashtags,
            seed: args.seed,
            dry_run,
            x_api_url,
            x_access_token,
            x_refresh_token,
            x_client_id,
            x_client_secret: non_empty("X_CLIENT_SECRET"),
            x_token_url,
            x_token_file,
        })
    }

    /// Builds the poster once; it is handed to the runner by reference.
    ///
    /// A token pair saved by an earlier refresh wins over the environment, since
    /// the refresh token in the environment has been spent by then.
    ///
    /// # Errors
    /// Returns an error if the http client cannot be built or no credential is available.
    pub fn poster(&self) -> Result<Box<dyn Poster>, BotError> {
        if self.dry_run {
            return Ok(Box::new(DryRunPoster));
        }

        let tokens = match load_tokens(&self.x_token_file)? {
            Some(saved) => {
                log::info!("Using X tokens from {}", self.x_token_file.display());
                XTokens {
                    refresh_token: saved.refresh_token.or_else(|| self.x_refresh_token.clone()),
                    ..saved
                }
            }
            None => XTokens {
                access_token: self.x_access_token.clone().unwrap_or_default(),
                refresh_token: self.x_refresh_token.clone(),
            },
        };
        if tokens.access_token.is_empty() && tokens.refresh_token.is_none() {
            return Err(BotError::Config("missing X_ACCESS_TOKEN".to_string()));
        }

        let poster = XPoster::new(&self.x_api_url, tokens)?;
        let poster = match &self.x_client_id {
            Some(client_id) => poster.with_refresh(TokenRefresh {
                token_url: self.x_token_url.clone(),
                client_id: client_id.clone(),
                client_secret: self.x_client_secret.clone(),
                token_file: self.x_token_file.clone(),
            }),
            None => poster,
        };
        Ok(Box::new(poster))
    }
}
