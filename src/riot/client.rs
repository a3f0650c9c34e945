use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::AppError;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate-limited HTTP client for the Riot Games API.
#[derive(Clone)]
pub struct RiotClient {
    http: reqwest::Client,
    limiter: Arc<DirectLimiter>,
    /// Riot API Key
    key: String,
    /// Replaces every routing host when set.
    base_url: Option<String>,
}

impl fmt::Debug for RiotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiotClient")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl RiotClient {
    pub fn new(key: String, requests_per_second: NonZeroU32) -> Self {
        let quota = Quota::per_second(requests_per_second);

        Self {
            http: reqwest::Client::new(),
            limiter: Arc::new(RateLimiter::direct(quota)),
            key,
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub(super) fn url(&self, routing_host: String, path: &str) -> String {
        let host = self.base_url.clone().unwrap_or(routing_host);
        format!("{host}{path}")
    }

    /// Waits for the limiter, then performs a GET and decodes the JSON body.
    pub(super) async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        self.limiter.until_ready().await;

        trace!(url, "🛰️ GET");

        let res = self
            .http
            .get(url)
            .header("X-Riot-Token", &self.key)
            .send()
            .await?;

        match res.status() {
            StatusCode::OK => Ok(res.json().await?),
            status => Err(AppError::RiotApi {
                status: status.as_u16(),
                message: res.text().await.unwrap_or_default(),
            }),
        }
    }
}
