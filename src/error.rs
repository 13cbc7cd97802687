use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum BotError {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("post error: {0}")]
    Post(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<std::io::Error> for BotError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<String> for BotError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

impl From<&str> for BotError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}
