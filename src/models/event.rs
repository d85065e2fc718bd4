//! Event listing records and the upstream listing envelopes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::EventType;

/// One listing record as shown on a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", try_from = "EventRecord")]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    /// Start date and time
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Ticket price, 0 for free events
    #[serde(default)]
    pub price: f64,
    #[serde(default, alias = "image")]
    pub image_ref: Option<String>,
    #[serde(default, alias = "views")]
    pub view_count: u64,
    #[serde(default)]
    pub featured: bool,
}

/// Listing record as the upstream sends it.
///
/// Document-store records may carry `_id`, `id` or both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    document_id: Option<String>,
    title: String,
    date: DateTime<Utc>,
    #[serde(default)]
    location: String,
    #[serde(rename = "type")]
    event_type: EventType,
    #[serde(default)]
    price: f64,
    #[serde(default, alias = "image")]
    image_ref: Option<String>,
    #[serde(default, alias = "views")]
    view_count: u64,
    #[serde(default)]
    featured: bool,
}

impl TryFrom<EventRecord> for EventSummary {
    type Error = String;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let id = record
            .id
            .or(record.document_id)
            .ok_or_else(|| format!("event \"{}\" has neither id nor _id", record.title))?;

        Ok(Self {
            id,
            title: record.title,
            date: record.date,
            location: record.location,
            event_type: record.event_type,
            price: record.price,
            image_ref: record.image_ref,
            view_count: record.view_count,
            featured: record.featured,
        })
    }
}

/// Full event record returned by `GET /events/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    #[serde(flatten)]
    pub summary: EventSummary,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Paginated wrapper some upstream list endpoints answer with
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEnvelope {
    pub data: Vec<EventSummary>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub pages: Option<u32>,
}

/// Both shapes `GET /events` is known to answer with
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListingResponse {
    Bare(Vec<EventSummary>),
    Envelope(ListingEnvelope),
}

impl ListingResponse {
    pub fn is_paginated(&self) -> bool {
        matches!(self, ListingResponse::Envelope(_))
    }

    /// Collapse either envelope into a `ListingPage`.
    ///
    /// `page_size` and `requested_page` are what was asked for; the envelope's
    /// own `page`/`pages` win when present. When the server's page count
    /// disagrees with the requested size (the upstream ignored `limit`), the
    /// page size is derived back from `total / pages`.
    pub fn normalize(self, page_size: u32, requested_page: u32) -> ListingPage {
        match self {
            ListingResponse::Bare(items) => {
                let total = items.len() as u64;
                let size = u32::try_from(items.len()).unwrap_or(u32::MAX).max(1);
                ListingPage::new(items, total, size, 1)
            }
            ListingResponse::Envelope(envelope) => {
                let total = envelope.total.unwrap_or(envelope.data.len() as u64);
                let (page_size, page_count) = match envelope.pages {
                    Some(pages) => (server_page_size(total, pages, page_size.max(1)), pages),
                    None => (page_size.max(1), ListingPage::page_count_for(total, page_size)),
                };
                ListingPage::with_page_count(
                    envelope.data,
                    total,
                    page_size,
                    envelope.page.unwrap_or(requested_page),
                    page_count,
                )
            }
        }
    }
}

/// Page size that makes `pages` the page count of `total` items.
///
/// Falls back to `requested` when it already agrees, or when no size can
/// produce `pages` (the server's count still wins then).
fn server_page_size(total: u64, pages: u32, requested: u32) -> u32 {
    if pages == 0 || ListingPage::page_count_for(total, requested) == pages {
        return requested;
    }
    let derived = u32::try_from(total.div_ceil(u64::from(pages)))
        .unwrap_or(u32::MAX)
        .max(1);
    if ListingPage::page_count_for(total, derived) == pages {
        derived
    } else {
        requested
    }
}

/// Normalized, paginated result set handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    pub items: Vec<EventSummary>,
    pub total_count: u64,
    pub page_size: u32,
    pub page_number: u32,
    pub page_count: u32,
}

impl ListingPage {
    pub fn new(items: Vec<EventSummary>, total_count: u64, page_size: u32, page_number: u32) -> Self {
        let page_size = page_size.max(1);
        let page_count = Self::page_count_for(total_count, page_size);
        Self::with_page_count(items, total_count, page_size, page_number, page_count)
    }

    fn with_page_count(
        items: Vec<EventSummary>,
        total_count: u64,
        page_size: u32,
        page_number: u32,
        page_count: u32,
    ) -> Self {
        Self {
            items,
            total_count,
            page_size,
            page_number: page_number.clamp(1, page_count.max(1)),
            page_count,
        }
    }

    pub fn empty(page_size: u32) -> Self {
        Self::new(Vec::new(), 0, page_size, 1)
    }

    /// `ceil(total / page_size)`
    pub fn page_count_for(total_count: u64, page_size: u32) -> u32 {
        let size = u64::from(page_size.max(1));
        u32::try_from(total_count.div_ceil(size)).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str) -> serde_json::Value {
        json!({
            "_id": id,
            "title": format!("Event {}", id),
            "date": "2025-06-21T19:30:00Z",
            "location": "Old Town",
            "type": "concert",
            "price": 15.0,
            "image": "/img/a.jpg",
            "views": 42,
            "featured": true
        })
    }

    #[test]
    fn test_event_summary_wire_aliases() {
        let event: EventSummary = serde_json::from_value(record("a1")).unwrap();
        assert_eq!(event.id, "a1");
        assert_eq!(event.image_ref.as_deref(), Some("/img/a.jpg"));
        assert_eq!(event.view_count, 42);
        assert_eq!(event.event_type, EventType::Concert);
        assert!(event.featured);
    }

    #[test]
    fn test_event_summary_with_both_ids() {
        let mut body = record("doc1");
        body["id"] = json!("virtual1");
        let event: EventSummary = serde_json::from_value(body).unwrap();
        assert_eq!(event.id, "virtual1");

        let mut body = record("doc2");
        body["id"] = json!("doc2");
        let response: ListingResponse = serde_json::from_value(json!([body, record("b")])).unwrap();
        let page = response.normalize(12, 1);
        let ids: Vec<&str> = page.items.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["doc2", "b"]);
    }

    #[test]
    fn test_event_summary_without_id_is_rejected() {
        let mut body = record("a");
        body.as_object_mut().unwrap().remove("_id");
        assert!(serde_json::from_value::<EventSummary>(body).is_err());

        let plain = json!({
            "id": "p1",
            "title": "Plain",
            "date": "2025-06-21T19:30:00Z",
            "type": "sport"
        });
        let event: EventSummary = serde_json::from_value(plain).unwrap();
        assert_eq!(event.id, "p1");
    }

    #[test]
    fn test_bare_array_is_single_page() {
        let body = json!([record("a"), record("b")]);
        let response: ListingResponse = serde_json::from_value(body).unwrap();
        assert!(!response.is_paginated());

        let page = response.normalize(12, 4);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 2);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.page_number, 1);
    }

    #[test]
    fn test_envelope_preserves_server_pagination() {
        let body = json!({
            "data": [record("a"), record("b")],
            "total": 25,
            "page": 2,
            "pages": 3
        });
        let response: ListingResponse = serde_json::from_value(body).unwrap();
        assert!(response.is_paginated());

        let page = response.normalize(12, 1);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.page_number, 2);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.page_size, 12);
    }

    #[test]
    fn test_envelope_ignoring_limit_keeps_count_consistent() {
        // upstream paged by 25 although 12 was asked for
        let body = json!({ "data": [record("a")], "total": 100, "page": 2, "pages": 4 });
        let response: ListingResponse = serde_json::from_value(body).unwrap();
        let page = response.normalize(12, 2);

        assert_eq!(page.page_count, 4);
        assert_eq!(page.page_size, 25);
        assert_eq!(page.page_count, ListingPage::page_count_for(page.total_count, page.page_size));
        assert_eq!(page.page_number, 2);
    }

    #[test]
    fn test_envelope_with_impossible_count_keeps_server_pages() {
        let body = json!({ "data": [], "total": 10, "page": 6, "pages": 6 });
        let response: ListingResponse = serde_json::from_value(body).unwrap();
        let page = response.normalize(12, 1);

        assert_eq!(page.page_count, 6);
        assert_eq!(page.page_size, 12);
        assert_eq!(page.page_number, 6);
    }

    #[test]
    fn test_envelope_without_pages_derives_count() {
        let body = json!({ "data": [], "total": 25 });
        let response: ListingResponse = serde_json::from_value(body).unwrap();
        let page = response.normalize(10, 7);
        assert_eq!(page.page_count, 3);
        // page clamped into [1, pageCount]
        assert_eq!(page.page_number, 3);
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        let body = json!({ "events": [] });
        assert!(serde_json::from_value::<ListingResponse>(body).is_err());
    }

    #[test]
    fn test_empty_page_clamps_to_first() {
        let page = ListingPage::new(Vec::new(), 0, 12, 5);
        assert_eq!(page.page_count, 0);
        assert_eq!(page.page_number, 1);
        assert_eq!(ListingPage::page_count_for(24, 12), 2);
        assert_eq!(ListingPage::page_count_for(25, 12), 3);
    }
}
