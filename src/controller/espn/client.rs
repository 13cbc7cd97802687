use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::error::BotError;

pub const DEFAULT_LEADERBOARD_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/golf/leaderboard";

pub const FETCH_ATTEMPTS: u32 = 3;
const FETCH_BASE_DELAY: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait EspnApiClient: Send + Sync {
    /// Fetches the current leaderboard document.
    ///
    /// # Errors
    ///
    /// Will return `Err` once every attempt to reach the leaderboard has failed.
    async fn get_leaderboard(&self) -> Result<Value, BotError>;
}

pub struct ReqwestEspnClient {
    client: Client,
    url: String,
    attempts: u32,
    base_delay: Duration,
}

impl ReqwestEspnClient {
    /// # Errors
    ///
    /// Will return `Err` if the http client cannot be built
    pub fn new(url: impl Into<String>) -> Result<Self, BotError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
            attempts: FETCH_ATTEMPTS,
            base_delay: FETCH_BASE_DELAY,
        })
    }

    /// Keeps the attempt budget, changes only the wait between attempts.
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, attempts: u32, base_delay: Duration) -> Self {
        self.attempts = attempts.max(1);
        self.base_delay = base_delay;
        self
    }

    async fn get_once(&self) -> Result<Value, BotError> {
        let resp = self.client.get(&self.url).send().await?.error_for_status()?;
        Ok(resp.json::<Value>().await?)
    }
}

#[async_trait]
impl EspnApiClient for ReqwestEspnClient {
    async fn get_leaderboard(&self) -> Result<Value, BotError> {
        let mut attempt = 1;
        loop {
            match self.get_once().await {
                Ok(json) => return Ok(json),
                Err(err) if attempt < self.attempts => {
                    let wait = self.base_delay * attempt;
                    log::warn!(
                        "Leaderboard attempt {attempt} failed ({err}), retrying in {}s",
                        wait.as_secs()
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(err) => {
                    log::error!("All {} leaderboard attempts failed: {err}", self.attempts);
                    return Err(err);
                }
            }
        }
    }
}
