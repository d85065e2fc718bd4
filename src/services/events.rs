//! Events service

use std::sync::Arc;

use crate::{
    context::DisplayContext,
    error::{AppError, AppResult},
    listing::{
        query::KEY_LIMIT, EventDetailView, FilterStore, ListingController, ListingRenderer,
        ListingView, QueryParameters,
    },
    models::FilterState,
    repository::{ListingSource, Repository},
};

/// Path the rendered links point at
pub const LISTING_PATH: &str = "/api/v1/events";

#[derive(Clone)]
pub struct EventsService {
    repository: Repository,
    page_size: u32,
    max_visible_pages: u32,
}

impl EventsService {
    pub fn new(repository: Repository, page_size: u32, max_visible_pages: u32) -> Self {
        Self {
            repository,
            page_size,
            max_visible_pages,
        }
    }

    /// Render the listing for `state`.
    ///
    /// Upstream failures never escape: they come back as a view with
    /// `has_error` set. Each call owns its controller, so concurrent
    /// requests for different filters never see each other's results.
    pub async fn list(&self, state: FilterState, ctx: &DisplayContext) -> ListingView {
        let store = FilterStore::new(state);
        let controller = ListingController::new(self.repository.events.clone(), self.page_size);
        controller.load(store.state()).await;
        let snapshot = controller.snapshot().await;

        ListingRenderer::new(ctx, LISTING_PATH, self.max_visible_pages).render(&store, &snapshot)
    }

    /// Render one event and count the view in the background
    pub async fn get_by_id(&self, id: &str, ctx: &DisplayContext) -> AppResult<EventDetailView> {
        let detail = self.repository.events.get_by_id(id).await.map_err(|e| {
            if e.is_not_found() {
                AppError::NotFound(format!("Event {} not found", id))
            } else {
                AppError::Upstream(e)
            }
        })?;

        let source = self.repository.events.clone();
        let event_id = id.to_string();
        tokio::spawn(async move { record_view_quietly(source, &event_id).await });

        Ok(ListingRenderer::new(ctx, LISTING_PATH, self.max_visible_pages).render_detail(&detail))
    }

    /// Cheapest possible listing read, used by the readiness probe
    pub async fn ping_upstream(&self) -> AppResult<()> {
        let params = QueryParameters::default().with(KEY_LIMIT, 1);
        self.repository.events.fetch(&params).await?;
        Ok(())
    }
}

/// View counting must never affect the page being shown
async fn record_view_quietly(source: Arc<dyn ListingSource>, id: &str) {
    if let Err(e) = source.record_view(id).await {
        tracing::warn!("Failed to record view for event {}: {}", id, e);
    }
}
