//! Runtime configuration structures

use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub poll: PollConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedConfig {
    pub api_url: String,
    pub referer: String,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_url: "https://alpha123.uk/api/data?fresh=1".to_string(),
            referer: "https://alpha123.uk/zh/index.html".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub topic_chat_id: Option<String>,
    pub topic_thread_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StateConfig {
    pub snapshot_file: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            snapshot_file: "alphawatch_state.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollConfig {
    /// Bounds of the jittered sleep between successful cycles.
    pub min_interval_secs: u64,
    pub max_interval_secs: u64,
    /// Fixed delay after a failed fetch.
    pub retry_delay_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            min_interval_secs: 300,
            max_interval_secs: 600,
            retry_delay_secs: 600,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.poll.min_interval_secs > self.poll.max_interval_secs {
            anyhow::bail!(
                "poll.min_interval_secs ({}) exceeds poll.max_interval_secs ({})",
                self.poll.min_interval_secs,
                self.poll.max_interval_secs
            );
        }
        Ok(())
    }

    /// Loads from the given path, falling back to built-in defaults
    /// when the file does not exist.
    pub fn load_or_default(path: &str) -> anyhow::Result<Self> {
        if std::path::Path::new(path).exists() {
            info!(path = %path, "Loading configuration");
            Self::load_from_file(path)
        } else {
            info!(path = %path, "No configuration file, using defaults");
            Ok(Self::default())
        }
    }
}
