//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{events, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "City Guide API",
        version = "0.1.0",
        description = "Event directory for the city: filtered, paginated listings rendered from the events API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Events
        events::list_events,
        events::get_event,
    ),
    components(
        schemas(
            // Events
            crate::models::EventSummary,
            crate::models::EventDetail,
            crate::models::FilterState,
            crate::models::EventType,
            crate::models::PriceCategory,
            crate::models::SortKey,
            crate::models::Theme,
            crate::listing::view::ListingView,
            crate::listing::view::EventCard,
            crate::listing::view::EventDetailView,
            crate::listing::view::PaginationView,
            crate::listing::view::PageLink,
            crate::listing::view::NavLink,
            crate::listing::view::FacetsView,
            crate::listing::view::FacetOption,
            crate::listing::controller::ListingError,
            crate::context::DisplayContext,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "events", description = "Event listings")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_event_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/events"));
        assert!(doc.paths.paths.contains_key("/events/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
