use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::error::BotError;

pub const DEFAULT_X_API_URL: &str = "https://api.x.com/2/tweets";
pub const DEFAULT_X_TOKEN_URL: &str = "https://api.x.com/2/oauth2/token";
/// Rotated tokens are kept in this file, next to the state file.
pub const DEFAULT_TOKEN_FILE: &str = "x_tokens.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostReceipt {
    pub id: Option<String>,
    pub url: Option<String>,
}

#[async_trait]
pub trait Poster: Send + Sync {
    /// Publishes `text`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the endpoint rejects the post or cannot be reached
    async fn post(&self, text: &str) -> Result<PostReceipt, BotError>;
}

/// Logs instead of posting. Every post counts as delivered.
pub struct DryRunPoster;

#[async_trait]
impl Poster for DryRunPoster {
    async fn post(&self, text: &str) -> Result<PostReceipt, BotError> {
        log::info!("[dry run] {text}");
        Ok(PostReceipt { id: None, url: None })
    }
}

/// OAuth 2.0 user-context token pair. Access tokens expire after about two hours;
/// the refresh token is single use and rotates on every refresh.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct XTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl fmt::Debug for XTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XTokens")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Reads the token pair saved by an earlier refresh.
///
/// # Errors
///
/// Will return `Err` if the file exists but cannot be read
pub fn load_tokens(path: &Path) -> Result<Option<XTokens>, BotError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    match serde_json::from_str::<XTokens>(&contents) {
        Ok(tokens) => Ok(Some(tokens)),
        Err(e) => {
            log::warn!("Token file {} is unreadable ({e}), ignoring it", path.display());
            Ok(None)
        }
    }
}

/// # Errors
///
/// Will return `Err` if the file cannot be written
pub fn save_tokens(path: &Path, tokens: &XTokens) -> Result<(), BotError> {
    let json = serde_json::to_string_pretty(tokens)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Where and as whom to trade a refresh token for a new pair.
#[derive(Clone)]
pub struct TokenRefresh {
    pub token_url: String,
    pub client_id: String,
    /// Only confidential clients have one; it is sent as basic auth.
    pub client_secret: Option<String>,
    pub token_file: PathBuf,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
}

#[derive(Serialize)]
struct CreatePostRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct CreatePostResponse {
    data: CreatePostData,
}

#[derive(Deserialize)]
struct CreatePostData {
    id: String,
}

/// Posts through the X API v2 with an OAuth 2.0 user-context token.
///
/// With a [`TokenRefresh`] attached, a 401 triggers one refresh and one retry.
pub struct XPoster {
    client: Client,
    api_url: String,
    tokens: Mutex<XTokens>,
    refresh: Option<TokenRefresh>,
}

impl XPoster {
    /// # Errors
    ///
    /// Will return `Err` if the http client cannot be built
    pub fn new(api_url: impl Into<String>, tokens: XTokens) -> Result<Self, BotError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            tokens: Mutex::new(tokens),
            refresh: None,
        })
    }

    #[must_use]
    pub fn with_refresh(mut self, refresh: TokenRefresh) -> Self {
        self.refresh = Some(refresh);
        self
    }

    async fn send(&self, text: &str, access_token: &str) -> Result<Response, BotError> {
        let auth = HeaderValue::from_str(&format!("Bearer {access_token}"))
            .map_err(|e| BotError::Config(format!("invalid access token: {e}")))?;

        self.client
            .post(&self.api_url)
            .header(AUTHORIZATION, auth)
            .json(&CreatePostRequest { text })
            .send()
            .await
            .map_err(|e| BotError::Post(e.to_string()))
    }

    /// Trades the refresh token for a new pair and persists it. Returns the new access token.
    async fn refresh_tokens(&self, refresh: &TokenRefresh) -> Result<String, BotError> {
        let mut tokens = self.tokens.lock().await;
        let refresh_token = tokens.refresh_token.clone().ok_or_else(|| {
            BotError::Config("access token rejected and no X_REFRESH_TOKEN to renew it".to_string())
        })?;

        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
            ("client_id", refresh.client_id.as_str()),
        ];
        let mut req = self.client.post(&refresh.token_url).form(&form);
        if let Some(secret) = &refresh.client_secret {
            req = req.basic_auth(&refresh.client_id, Some(secret));
        }
        let resp = req
            .send()
            .await
            .map_err(|e| BotError::Post(format!("token refresh failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::Post(format!("token refresh returned {status}: {body}")));
        }
        let granted = resp
            .json::<TokenResponse>()
            .await
            .map_err(|e| BotError::Post(format!("unexpected token response: {e}")))?;

        *tokens = XTokens {
            access_token: granted.access_token,
            refresh_token: granted.refresh_token.or(Some(refresh_token)),
        };
        // the old refresh token is spent, so losing the new one means a manual re-login
        match save_tokens(&refresh.token_file, &tokens) {
            Ok(()) => log::info!("Refreshed X tokens, saved to {}", refresh.token_file.display()),
            Err(e) => log::error!("Refreshed X tokens but could not save them: {e}"),
        }
        Ok(tokens.access_token.clone())
    }
}

#[async_trait]
impl Poster for XPoster {
    async fn post(&self, text: &str) -> Result<PostReceipt, BotError> {
        let access_token = self.tokens.lock().await.access_token.clone();
        let mut resp = self.send(text, &access_token).await?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            if let Some(refresh) = &self.refresh {
                log::warn!("X API rejected the access token, refreshing");
                let access_token = self.refresh_tokens(refresh).await?;
                resp = self.send(text, &access_token).await?;
            }
        }

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::Post(format!("X API returned {status}: {body}")));
        }

        // a 2xx means the post exists, even if the body is not what we expect
        match resp.json::<CreatePostResponse>().await {
            Ok(created) => {
                let url = format!("https://x.com/i/status/{}", created.data.id);
                Ok(PostReceipt {
                    id: Some(created.data.id),
                    url: Some(url),
                })
            }
            Err(e) => {
                log::warn!("Posted, but the X API response was unexpected: {e}");
                Ok(PostReceipt { id: None, url: None })
            }
        }
    }
}
