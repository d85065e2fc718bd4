//! Listing controller: drives fetches for one listing screen.
//!
//! Every load takes a ticket from a monotonically increasing sequence. A
//! completion only updates the visible state when its ticket is still the
//! latest one issued, so a slow response to an old filter can never
//! overwrite the result of a newer one.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use utoipa::ToSchema;

use crate::{
    error::FetchError,
    listing::query::{QueryParameters, KEY_LIMIT},
    models::{FilterState, ListingPage},
    repository::ListingSource,
};

/// Sequence number of one issued load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Error shown in place of the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ListingError {
    pub status: Option<u16>,
    pub message: String,
}

impl From<&FetchError> for ListingError {
    fn from(e: &FetchError) -> Self {
        Self {
            status: e.status(),
            message: e.to_string(),
        }
    }
}

/// What the renderer sees
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub page: ListingPage,
    pub is_loading: bool,
    pub error: Option<ListingError>,
}

impl ListingSnapshot {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.page.items.is_empty() && !self.is_loading && !self.has_error()
    }
}

struct Inner {
    latest: u64,
    snapshot: ListingSnapshot,
}

pub struct ListingController {
    source: Arc<dyn ListingSource>,
    page_size: u32,
    inner: Mutex<Inner>,
}

impl ListingController {
    pub fn new(source: Arc<dyn ListingSource>, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        Self {
            source,
            page_size,
            inner: Mutex::new(Inner {
                latest: 0,
                snapshot: ListingSnapshot {
                    page: ListingPage::empty(page_size),
                    is_loading: false,
                    error: None,
                },
            }),
        }
    }

    /// Fetch the listing for `state`.
    ///
    /// Returns `false` when a newer load was issued meanwhile and this
    /// result was dropped.
    pub async fn load(&self, state: &FilterState) -> bool {
        let params = QueryParameters::build(state).with(KEY_LIMIT, self.page_size);
        let ticket = self.begin().await;
        let result = self.source.fetch(&params).await;
        self.complete(ticket, result).await
    }

    /// Issue a new ticket and mark the listing as loading
    pub async fn begin(&self) -> Ticket {
        let mut inner = self.inner.lock().await;
        inner.latest += 1;
        inner.snapshot.is_loading = true;
        Ticket(inner.latest)
    }

    /// Apply the outcome of the load holding `ticket`.
    ///
    /// A failure clears the items; the previous listing is not kept around.
    pub async fn complete(&self, ticket: Ticket, result: Result<ListingPage, FetchError>) -> bool {
        let mut inner = self.inner.lock().await;
        if ticket.0 != inner.latest {
            tracing::debug!(
                "Discarding stale listing response (ticket {}, latest {})",
                ticket.0,
                inner.latest
            );
            return false;
        }

        inner.snapshot = match result {
            Ok(page) => ListingSnapshot {
                page,
                is_loading: false,
                error: None,
            },
            Err(e) => {
                tracing::error!("Failed to load event listing: {}", e);
                ListingSnapshot {
                    page: ListingPage::empty(self.page_size),
                    is_loading: false,
                    error: Some(ListingError::from(&e)),
                }
            }
        };
        true
    }

    pub async fn snapshot(&self) -> ListingSnapshot {
        self.inner.lock().await.snapshot.clone()
    }
}
