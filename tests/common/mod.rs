#![allow(dead_code)]

use async_trait::async_trait;
use golfer_status_bot::controller::decision::{Announcer, Update};
use golfer_status_bot::controller::espn::EspnApiClient;
use golfer_status_bot::error::BotError;
use golfer_status_bot::model::{BotState, Snapshot};
use golfer_status_bot::post::{PostReceipt, Poster};
use golfer_status_bot::storage::StateStore;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const TOURNAMENT: &str = "RSM Classic";
pub const ATHLETE: &str = "Neal Shipley";

/// One leaderboard competitor in the shape the feed sends.
pub fn competitor(
    name: &str,
    position: &str,
    total: &str,
    thru: Value,
    period: u32,
    status_display: &str,
    linescores: &[&str],
) -> Value {
    json!({
        "athlete": { "displayName": name },
        "score": { "displayValue": total },
        "position": { "displayName": position },
        "status": {
            "thru": thru,
            "period": period,
            "displayValue": status_display,
            "type": { "name": "STATUS_IN_PROGRESS" }
        },
        "linescores": linescores
            .iter()
            .map(|s| json!({ "displayValue": s }))
            .collect::<Vec<_>>(),
    })
}

pub fn leaderboard(competitors: Vec<Value>) -> Value {
    json!({
        "events": [{
            "name": TOURNAMENT,
            "status": { "type": { "name": "STATUS_IN_PROGRESS" } },
            "competitions": [{ "competitors": competitors }]
        }]
    })
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        athlete: ATHLETE.to_string(),
        tournament: TOURNAMENT.to_string(),
        round: 1,
        holes_completed: None,
        is_live: false,
        is_done: false,
        today_score: None,
        total_score: None,
        position: String::new(),
        tee_time: String::new(),
        missed_cut: false,
    }
}

pub fn live_snapshot(round: u32, holes: u32, today: i32) -> Snapshot {
    Snapshot {
        round,
        holes_completed: Some(holes),
        is_live: true,
        today_score: Some(today),
        total_score: Some(today),
        position: "T8".to_string(),
        ..snapshot()
    }
}

pub fn finished_snapshot(round: u32, today: i32) -> Snapshot {
    Snapshot {
        round,
        holes_completed: Some(18),
        is_done: true,
        today_score: Some(today),
        total_score: Some(today),
        position: "T8".to_string(),
        ..snapshot()
    }
}

pub fn tee_time_snapshot(round: u32) -> Snapshot {
    Snapshot {
        round,
        tee_time: "Thu 8:40 AM".to_string(),
        ..snapshot()
    }
}

/// Records every update; delivery succeeds unless `deliver` is false.
pub struct RecordingAnnouncer {
    pub deliver: bool,
    pub seen: Vec<Update>,
}

impl RecordingAnnouncer {
    pub fn delivering() -> Self {
        Self {
            deliver: true,
            seen: Vec::new(),
        }
    }

    pub fn failing() -> Self {
        Self {
            deliver: false,
            seen: Vec::new(),
        }
    }
}

#[async_trait]
impl Announcer for RecordingAnnouncer {
    async fn announce(&mut self, update: Update, _snapshot: &Snapshot) -> bool {
        self.seen.push(update);
        self.deliver
    }
}

pub struct FakeEspn {
    pub response: Result<Value, BotError>,
    pub calls: Mutex<u32>,
}

impl FakeEspn {
    pub fn returning(json: Value) -> Self {
        Self {
            response: Ok(json),
            calls: Mutex::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: Err(BotError::Network("connection refused".to_string())),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock().expect("calls lock")
    }
}

#[async_trait]
impl EspnApiClient for FakeEspn {
    async fn get_leaderboard(&self) -> Result<Value, BotError> {
        *self.calls.lock().expect("calls lock") += 1;
        self.response.clone()
    }
}

pub struct RecordingPoster {
    pub fail: bool,
    pub posts: Mutex<Vec<String>>,
}

impl RecordingPoster {
    pub fn new() -> Self {
        Self {
            fail: false,
            posts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            posts: Mutex::new(Vec::new()),
        }
    }

    pub fn posts(&self) -> Vec<String> {
        self.posts.lock().expect("posts lock").clone()
    }
}

#[async_trait]
impl Poster for RecordingPoster {
    async fn post(&self, text: &str) -> Result<PostReceipt, BotError> {
        self.posts.lock().expect("posts lock").push(text.to_string());
        if self.fail {
            return Err(BotError::Post("503 Service Unavailable".to_string()));
        }
        Ok(PostReceipt {
            id: Some("1".to_string()),
            url: Some("https://x.com/i/status/1".to_string()),
        })
    }
}

pub struct MemoryStore {
    pub state: Mutex<BotState>,
    pub saves: Mutex<u32>,
}

impl MemoryStore {
    pub fn new(state: BotState) -> Self {
        Self {
            state: Mutex::new(state),
            saves: Mutex::new(0),
        }
    }

    pub fn state(&self) -> BotState {
        self.state.lock().expect("state lock").clone()
    }

    pub fn saves(&self) -> u32 {
        *self.saves.lock().expect("saves lock")
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<BotState, BotError> {
        Ok(self.state())
    }

    fn save(&self, state: &BotState) -> Result<(), BotError> {
        *self.state.lock().expect("state lock") = state.clone();
        *self.saves.lock().expect("saves lock") += 1;
        Ok(())
    }
}

/// Local HTTP endpoint that answers each connection with the next canned
/// `(status, body)`, repeating the last one once the list runs out.
pub struct CannedServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    pub async fn start(responses: Vec<(u16, &'static str)>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            let mut next = 0;
            while let Ok((mut stream, _)) = listener.accept().await {
                let Ok(request) = read_request(&mut stream).await else {
                    continue;
                };
                seen.lock().expect("requests lock").push(request);

                let (status, body) = responses[next.min(responses.len() - 1)];
                next += 1;
                let reply = format!(
                    "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(reply.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Ok(Self { base_url, requests })
    }

    /// Every request received so far, head and body, lowercased.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 2048];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + body_len {
                break;
            }
        }
    }
    Ok(String::from_utf8_lossy(&buf).to_lowercase())
}
