mod common;

use common::CannedServer;
use golfer_status_bot::error::BotError;
use golfer_status_bot::post::{Poster, TokenRefresh, XPoster, XTokens, load_tokens, save_tokens};

const UNAUTHORIZED: &str = r#"{"title":"Unauthorized","status":401}"#;
const GRANTED: &str = r#"{"token_type":"bearer","expires_in":7200,"access_token":"fresh-access","refresh_token":"rotated-refresh","scope":"tweet.write users.read offline.access"}"#;
const CREATED: &str = r#"{"data":{"id":"1860000000000000042","text":"hello"}}"#;

fn stale_tokens() -> XTokens {
    XTokens {
        access_token: "stale-access".to_string(),
        refresh_token: Some("old-refresh".to_string()),
    }
}

fn refresh_config(server: &CannedServer, dir: &tempfile::TempDir) -> TokenRefresh {
    TokenRefresh {
        token_url: format!("{}/2/oauth2/token", server.base_url),
        client_id: "bot-client".to_string(),
        client_secret: None,
        token_file: dir.path().join("x_tokens.json"),
    }
}

#[tokio::test]
async fn test9_expired_token_is_refreshed_and_post_retried()
-> Result<(), Box<dyn std::error::Error>> {
    let server =
        CannedServer::start(vec![(401, UNAUTHORIZED), (200, GRANTED), (201, CREATED)]).await?;
    let dir = tempfile::tempdir()?;
    let refresh = refresh_config(&server, &dir);
    let token_file = refresh.token_file.clone();

    let poster = XPoster::new(format!("{}/2/tweets", server.base_url), stale_tokens())?
        .with_refresh(refresh);
    let receipt = poster.post("hello").await?;
    assert_eq!(receipt.id.as_deref(), Some("1860000000000000042"));
    assert_eq!(
        receipt.url.as_deref(),
        Some("https://x.com/i/status/1860000000000000042")
    );

    let requests = server.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].starts_with("post /2/tweets"));
    assert!(requests[0].contains("authorization: bearer stale-access"));
    assert!(requests[1].starts_with("post /2/oauth2/token"));
    assert!(requests[1].contains("grant_type=refresh_token"));
    assert!(requests[1].contains("refresh_token=old-refresh"));
    assert!(requests[1].contains("client_id=bot-client"));
    assert!(requests[2].contains("authorization: bearer fresh-access"));

    let saved = load_tokens(&token_file)?.ok_or("token file not written")?;
    assert_eq!(saved.access_token, "fresh-access");
    assert_eq!(saved.refresh_token.as_deref(), Some("rotated-refresh"));

    // the next post goes straight through with the new token
    let server = CannedServer::start(vec![(201, CREATED)]).await?;
    let poster = XPoster::new(format!("{}/2/tweets", server.base_url), saved)?;
    poster.post("again").await?;
    assert!(server.requests()[0].contains("authorization: bearer fresh-access"));
    Ok(())
}

#[tokio::test]
async fn test9_refresh_is_attempted_once() -> Result<(), Box<dyn std::error::Error>> {
    let server = CannedServer::start(vec![(401, UNAUTHORIZED), (200, GRANTED), (401, UNAUTHORIZED)])
        .await?;
    let dir = tempfile::tempdir()?;
    let poster = XPoster::new(format!("{}/2/tweets", server.base_url), stale_tokens())?
        .with_refresh(refresh_config(&server, &dir));

    let err = poster.post("hello").await.unwrap_err();
    assert!(matches!(err, BotError::Post(_)), "{err:?}");
    assert_eq!(server.requests().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test9_rejected_refresh_keeps_old_tokens() -> Result<(), Box<dyn std::error::Error>> {
    let server = CannedServer::start(vec![
        (401, UNAUTHORIZED),
        (400, r#"{"error":"invalid_request"}"#),
    ])
    .await?;
    let dir = tempfile::tempdir()?;
    let refresh = refresh_config(&server, &dir);
    let token_file = refresh.token_file.clone();
    let poster = XPoster::new(format!("{}/2/tweets", server.base_url), stale_tokens())?
        .with_refresh(refresh);

    let err = poster.post("hello").await.unwrap_err();
    assert!(err.to_string().contains("400"), "{err}");
    assert_eq!(server.requests().len(), 2);
    assert!(load_tokens(&token_file)?.is_none());
    Ok(())
}

#[tokio::test]
async fn test9_without_refresh_a_401_is_a_failure() -> Result<(), Box<dyn std::error::Error>> {
    let server = CannedServer::start(vec![(401, UNAUTHORIZED)]).await?;
    let poster = XPoster::new(format!("{}/2/tweets", server.base_url), stale_tokens())?;

    let err = poster.post("hello").await.unwrap_err();
    assert!(err.to_string().contains("401"), "{err}");
    assert_eq!(server.requests().len(), 1);
    Ok(())
}

#[test]
fn test9_token_file_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("x_tokens.json");
    assert!(load_tokens(&path)?.is_none());

    save_tokens(&path, &stale_tokens())?;
    assert_eq!(load_tokens(&path)?, Some(stale_tokens()));

    std::fs::write(&path, "not json")?;
    assert!(load_tokens(&path)?.is_none());

    // tokens never show up in logs
    assert!(!format!("{:?}", stale_tokens()).contains("stale-access"));
    Ok(())
}
