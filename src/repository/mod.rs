//! Repository layer for upstream API access

pub mod events;

use std::sync::Arc;

use crate::{config::UpstreamConfig, error::AppResult};

pub use events::{EventsRepository, ListingSource};

/// Main repository struct holding the upstream data sources
#[derive(Clone)]
pub struct Repository {
    pub events: Arc<dyn ListingSource>,
}

impl Repository {
    /// Create a repository talking to the configured upstream API
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        Ok(Self::with_events(Arc::new(EventsRepository::new(config)?)))
    }

    pub fn with_events(events: Arc<dyn ListingSource>) -> Self {
        Self { events }
    }
}
