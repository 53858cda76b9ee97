use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use super::models::{EventSummary, Page};
use super::paginator::{collect_pages, PageSource};
use crate::error::{Result, UpsetError};

/// Client for the RobotEvents v2 REST API.
#[derive(Clone)]
pub struct RobotEventsClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl RobotEventsClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(RobotEventsClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Resolve an event SKU to its numeric RobotEvents id.
    ///
    /// Takes the first search hit. An empty result set, or one whose first
    /// entry has no usable `id`, is reported as [`UpsetError::NotFound`].
    pub async fn resolve_event_id(&self, sku: &str) -> Result<u64> {
        let url = self.events_url();
        let body = self.get(&url, Some(&[("sku", sku)])).await?;
        let raw: Value =
            serde_json::from_str(&body).map_err(|e| UpsetError::decode("event search response", e))?;

        let id = first_event_id(&raw).ok_or_else(|| UpsetError::NotFound(sku.to_string()))?;
        info!("Resolved event {} to id {}", sku, id);
        Ok(id)
    }

    /// Raw match records for one division of an event, across all pages.
    pub async fn fetch_matches(&self, event_id: u64, division: u32) -> Result<Vec<Value>> {
        let url = self.division_url(event_id, division, "matches");
        let records = collect_pages(self, &url).await?;
        info!("Fetched {} match record(s) for division {}", records.len(), division);
        Ok(records)
    }

    /// Raw ranking records for one division of an event, across all pages.
    pub async fn fetch_rankings(&self, event_id: u64, division: u32) -> Result<Vec<Value>> {
        let url = self.division_url(event_id, division, "rankings");
        let records = collect_pages(self, &url).await?;
        info!("Fetched {} ranking record(s) for division {}", records.len(), division);
        Ok(records)
    }

    fn events_url(&self) -> String {
        format!("{}/events", self.base_url)
    }

    fn division_url(&self, event_id: u64, division: u32, resource: &str) -> String {
        format!(
            "{}/events/{}/divisions/{}/{}",
            self.base_url, event_id, division, resource
        )
    }

    /// Single GET attempt. Non-success statuses become [`UpsetError::Http`]
    /// carrying the response body.
    async fn get(&self, url: &str, query: Option<&[(&str, &str)]>) -> Result<String> {
        let token = self.token.as_deref().unwrap_or_default();
        debug!("GET {}", url);

        let mut req = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", token));
        if let Some(query) = query {
            req = req.query(query);
        }

        let resp = req.send().await.map_err(|source| UpsetError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UpsetError::Http {
                url: url.to_string(),
                status,
                body,
            });
        }

        resp.text().await.map_err(|source| UpsetError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl PageSource for RobotEventsClient {
    async fn fetch_page(&self, url: &str) -> Result<Page> {
        let body = self.get(url, None).await?;
        serde_json::from_str(&body).map_err(|e| UpsetError::decode(format!("page {}", url), e))
    }
}

// ── Parsing helpers ────────────────────────────────────────────────────────────

fn first_event_id(raw: &Value) -> Option<u64> {
    let first = raw.get("data")?.as_array()?.first()?;
    EventSummary::deserialize(first).ok().map(|event| event.id)
}
