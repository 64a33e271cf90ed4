//! Airdrop feed client.
//!
//! Fetches the current event list from the alpha123 API. Any failure
//! (network, non-2xx, malformed payload) surfaces as one error for the
//! orchestrator to skip the cycle on.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::FeedConfig;
use crate::core::AirdropEvent;

/// Source of raw airdrop events, one fetch per poll cycle.
pub trait FeedSource: Send + Sync {
    fn fetch_events(&self) -> impl Future<Output = Result<Vec<AirdropEvent>>> + Send;
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    // No default: a payload without the airdrops key is malformed,
    // not an empty feed. Accepting it would wipe the persisted state
    // and re-announce everything on the next good fetch.
    airdrops: Vec<AirdropEvent>,
}

#[derive(Debug, Clone)]
pub struct AlphaFeedClient {
    client: Client,
    api_url: String,
    referer: String,
}

impl AlphaFeedClient {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            referer: config.referer.clone(),
        })
    }
}

impl FeedSource for AlphaFeedClient {
    async fn fetch_events(&self) -> Result<Vec<AirdropEvent>> {
        debug!(url = %self.api_url, "Fetching airdrop feed");

        let response = self
            .client
            .get(&self.api_url)
            .header("referer", &self.referer)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Feed API error: {}", response.status()));
        }

        let data: FeedResponse = response.json().await?;
        debug!(events = data.airdrops.len(), "Feed fetched");
        Ok(data.airdrops)
    }
}
