//! Events repository: reads listings from the upstream document-store API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};

use crate::{
    config::UpstreamConfig,
    error::{AppError, AppResult, FetchError},
    listing::{
        query::{QueryParameters, KEY_LIMIT, KEY_PAGE, KEY_SORT},
        sort::sort_events,
    },
    models::{EventDetail, ListingPage, ListingResponse, SortKey},
};

/// Longest upstream error body quoted back in a `FetchError`
const MAX_ERROR_MESSAGE: usize = 200;

/// Read side of the upstream events API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// `GET /events?{params}`, normalized to a single page shape
    async fn fetch(&self, params: &QueryParameters) -> Result<ListingPage, FetchError>;

    /// `GET /events/{id}`
    async fn get_by_id(&self, id: &str) -> Result<EventDetail, FetchError>;

    /// `POST /events/{id}/view`
    async fn record_view(&self, id: &str) -> Result<(), FetchError>;
}

#[derive(Clone)]
pub struct EventsRepository {
    client: Client,
    base_url: Url,
    page_size: u32,
}

impl EventsRepository {
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::Internal(format!("Invalid upstream URL {}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Internal(format!(
                "Upstream URL {} cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            page_size: config.page_size.max(1),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Body of a 2xx response, or `FetchError::Http` quoting the upstream message
    async fn success_body(response: Response) -> Result<Vec<u8>, FetchError> {
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        if status.is_success() {
            return Ok(body);
        }

        Err(FetchError::Http {
            status: status.as_u16(),
            message: error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
        })
    }
}

/// `message`/`error` field of a JSON error body, or the raw text
fn error_message(body: &[u8]) -> Option<String> {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        let field = value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(|v| v.as_str());
        if let Some(message) = field {
            return Some(message.to_string());
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.chars().take(MAX_ERROR_MESSAGE).collect())
    }
}

#[async_trait]
impl ListingSource for EventsRepository {
    async fn fetch(&self, params: &QueryParameters) -> Result<ListingPage, FetchError> {
        let url = self.endpoint(&["events"]);
        tracing::debug!("GET {}?{}", url, params.to_query_string());

        let pairs: Vec<(&str, &str)> = params.iter().collect();
        let response = self.client.get(url).query(&pairs).send().await?;
        let body = Self::success_body(response).await?;
        let listing: ListingResponse = serde_json::from_slice(&body)?;

        let requested_page = params
            .get(KEY_PAGE)
            .and_then(|p| p.parse().ok())
            .unwrap_or(1);
        let limit = params
            .get(KEY_LIMIT)
            .and_then(|l| l.parse().ok())
            .unwrap_or(self.page_size);

        let paginated = listing.is_paginated();
        let mut page = listing.normalize(limit, requested_page);

        // a bare array means the upstream ignored `sort`
        if !paginated {
            if let Some(key) = params.get(KEY_SORT).and_then(SortKey::from_param) {
                sort_events(&mut page.items, key);
            }
        }

        tracing::debug!(
            "Listing fetched: {} items, page {}/{}, total {}",
            page.items.len(),
            page.page_number,
            page.page_count,
            page.total_count
        );
        Ok(page)
    }

    async fn get_by_id(&self, id: &str) -> Result<EventDetail, FetchError> {
        let url = self.endpoint(&["events", id]);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let body = Self::success_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn record_view(&self, id: &str) -> Result<(), FetchError> {
        let url = self.endpoint(&["events", id, "view"]);
        tracing::debug!("POST {}", url);

        let response = self.client.post(url).send().await?;
        Self::success_body(response).await?;
        Ok(())
    }
}
