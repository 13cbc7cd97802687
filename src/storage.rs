use std::path::{Path, PathBuf};

use crate::error::BotError;
use crate::model::BotState;

pub const DEFAULT_STATE_FILE: &str = "bot_state.json";

pub trait StateStore: Send + Sync {
    /// # Errors
    ///
    /// Will return `Err` if the stored state exists but cannot be read
    fn load(&self) -> Result<BotState, BotError>;

    /// # Errors
    ///
    /// Will return `Err` if the state cannot be written
    fn save(&self, state: &BotState) -> Result<(), BotError>;
}

/// Keeps the state as one pretty-printed JSON object on disk.
#[derive(Clone, Debug)]
pub struct JsonFileStateStore {
    path: PathBuf,
}

impl JsonFileStateStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStateStore {
    fn load(&self) -> Result<BotState, BotError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No state file at {}, starting fresh", self.path.display());
                return Ok(BotState::default());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<BotState>(&contents) {
            Ok(state) => Ok(state),
            Err(e) => {
                log::warn!(
                    "State file {} is unreadable ({e}), starting fresh",
                    self.path.display()
                );
                Ok(BotState::default())
            }
        }
    }

    fn save(&self, state: &BotState) -> Result<(), BotError> {
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
