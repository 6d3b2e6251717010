use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::FetchError;
use crate::retry::retry_async;
use crate::types::{Competition, RawCompetition};

const COMPETITION_PATH: &str = "/sapi/v1/alpha/competitive/list";
const API_KEY_HEADER: &str = "X-MBX-APIKEY";
const RETRY_DELAY: Duration = Duration::from_millis(500);
const MAX_ERROR_BODY: usize = 300;

/// Anything that can list the competitions running right now
#[async_trait]
pub trait CompetitionSource {
    async fn fetch_active_competitions(&self) -> Result<Vec<Competition>, FetchError>;
}

/// Binance Alpha competition list client
pub struct AlphaClient {
    client: Client,
    url: String,
    api_key: Option<String>,
    attempts: u32,
}

impl AlphaClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .connect_timeout(config.fetch_timeout)
            .build()?;

        Ok(Self {
            client,
            url: format!("{}{}", config.binance_url.trim_end_matches('/'), COMPETITION_PATH),
            api_key: config.api_key.clone(),
            attempts: config.fetch_attempts,
        })
    }

    /// GET of the list, with the API key header only when a key is configured
    fn request(&self) -> RequestBuilder {
        let request = self.client.get(&self.url);
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    /// One GET of the competition list, parsed but not yet filtered
    async fn fetch_list(&self) -> Result<Vec<RawCompetition>, FetchError> {
        let response = self.request().send().await?;
        let status = response.status();
        let body = response.text().await?;

        check_status(status, &body)?;
        parse_competitions(&body)
    }
}

#[async_trait]
impl CompetitionSource for AlphaClient {
    async fn fetch_active_competitions(&self) -> Result<Vec<Competition>, FetchError> {
        let raw = retry_async("Competition fetch", self.attempts, RETRY_DELAY, || {
            self.fetch_list()
        })
        .await?;

        let now_ms = Utc::now().timestamp_millis();
        let total = raw.len();
        let active = active_at(raw, now_ms);

        info!("Fetched {} competitions, {} active", total, active.len());
        Ok(active)
    }
}

/// Map a non-success status to a `FetchError` carrying the response detail
pub fn check_status(status: StatusCode, body: &str) -> Result<(), FetchError> {
    if status.is_success() {
        return Ok(());
    }

    let mut detail: String = body.trim().chars().take(MAX_ERROR_BODY).collect();
    if detail.is_empty() {
        detail = status.canonical_reason().unwrap_or("no response body").to_string();
    }

    Err(FetchError::Status {
        status: status.as_u16(),
        body: detail,
    })
}

/// Strict parse: one malformed element rejects the whole list
pub fn parse_competitions(body: &str) -> Result<Vec<RawCompetition>, FetchError> {
    let competitions: Vec<RawCompetition> = serde_json::from_str(body)?;
    Ok(competitions)
}

/// Keep competitions whose window contains `now_ms`, in upstream order
pub fn active_at(raw: Vec<RawCompetition>, now_ms: i64) -> Vec<Competition> {
    raw.into_iter()
        .filter(|c| {
            let active = c.is_active_at(now_ms);
            if !active {
                debug!("Skipping {} ({}): outside active window", c.id(), c.symbol);
            }
            active
        })
        .map(Competition::from)
        .collect()
}
