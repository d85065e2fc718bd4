//! Business logic services

pub mod events;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub events: events::EventsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        Self {
            events: events::EventsService::new(
                repository,
                config.upstream.page_size,
                config.display.max_visible_pages,
            ),
        }
    }
}
